//! Discrete-step rotation scheduling.
//!
//! The scheduler owns the wheel's cumulative angle. While running it is ticked
//! once per unit duration by whoever owns the timer (see `app::wheel_loop`);
//! each tick reads the live angular velocity, advances the angle and hands back
//! the interval a renderer should sweep across before the next tick.

use std::time::Duration;

use crate::profile_scope;
use crate::units::DEGREES_PER_REVOLUTION;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    /// Angle carried from the previous tick, degrees
    pub cumulative_angle_deg: f64,
    pub run_state: RunState,
}

/// Rotation to animate across one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationInterval {
    /// 1-based index of the tick that produced this interval
    pub tick: u64,
    pub initial_deg: f64,
    pub final_deg: f64,
    pub duration: Duration,
}

impl RotationInterval {
    pub fn sweep_deg(&self) -> f64 {
        self.final_deg - self.initial_deg
    }

    /// Linear interpolation across the interval, `progress` clamped to [0, 1].
    pub fn angle_at(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        self.initial_deg + self.sweep_deg() * t
    }
}

#[derive(Clone, Debug)]
pub struct RotationScheduler {
    state: RotationState,
    unit_duration: Duration,
    ticks: u64,
}

impl RotationScheduler {
    pub fn new(unit_duration: Duration) -> Self {
        Self {
            state: RotationState::default(),
            unit_duration,
            ticks: 0,
        }
    }

    /// Idle -> Running. Returns false (and changes nothing) when already running,
    /// so a second start never spawns a second tick chain.
    pub fn start(&mut self) -> bool {
        if self.state.run_state == RunState::Running {
            return false;
        }
        self.state.run_state = RunState::Running;
        true
    }

    /// Running -> Idle. The interval already handed out is left to finish; no
    /// further tick will mutate the angle.
    pub fn stop(&mut self) -> bool {
        if self.state.run_state == RunState::Idle {
            return false;
        }
        self.state.run_state = RunState::Idle;
        true
    }

    /// External re-initialization: back to angle 0, idle, tick count cleared.
    pub fn reset(&mut self) {
        self.state = RotationState::default();
        self.ticks = 0;
    }

    /// Advance one tick using the angular velocity in effect right now.
    ///
    /// Wraparound is a single subtraction of a revolution from the carried angle,
    /// not a modulo.
    pub fn on_tick(&mut self, angular_velocity_rps: f64) -> Option<RotationInterval> {
        if self.state.run_state != RunState::Running {
            return None;
        }
        profile_scope!("rotation_tick");

        let mut initial = self.state.cumulative_angle_deg;
        if initial > DEGREES_PER_REVOLUTION {
            initial -= DEGREES_PER_REVOLUTION;
        }
        let final_deg = initial
            + angular_velocity_rps * DEGREES_PER_REVOLUTION * self.unit_duration.as_secs_f64();
        self.state.cumulative_angle_deg = final_deg;
        self.ticks += 1;

        Some(RotationInterval {
            tick: self.ticks,
            initial_deg: initial,
            final_deg,
            duration: self.unit_duration,
        })
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn is_running(&self) -> bool {
        self.state.run_state == RunState::Running
    }

    pub fn cumulative_angle_deg(&self) -> f64 {
        self.state.cumulative_angle_deg
    }

    pub fn unit_duration(&self) -> Duration {
        self.unit_duration
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[cfg(test)]
    pub(crate) fn set_cumulative_angle(&mut self, angle_deg: f64) {
        self.state.cumulative_angle_deg = angle_deg;
    }
}

impl Default for RotationScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(crate::config::DEFAULT_UNIT_DURATION_S))
    }
}
