use std::time::{Duration, Instant};

use crossbeam::channel::{self, select};
use log::{debug, info, warn};

use crate::commands::{process_command, LoopControl, WheelStatus};
use crate::parameters::ParameterSnapshot;
use crate::physics::PhysicsResult;
use crate::rotation::{RotationInterval, RunState};
use crate::scene::WheelScene;
use crate::wheel::Wheel;

use super::{LoopHandles, SharedDisplay};

/// What a renderer needs after each command or tick.
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    pub snapshot: ParameterSnapshot,
    pub result: PhysicsResult,
    pub run_state: RunState,
    pub cumulative_angle_deg: f64,
    pub ticks: u64,
    pub last_interval: Option<RotationInterval>,
    pub scene: WheelScene,
}

/// Copy the wheel's renderer-facing state into the shared display.
pub fn publish(wheel: &Wheel, display: &SharedDisplay) {
    let mut lock = display.lock();
    lock.snapshot = wheel.snapshot();
    lock.result = wheel.result();
    lock.run_state = wheel.run_state();
    lock.cumulative_angle_deg = wheel.scheduler().cumulative_angle_deg();
    lock.ticks = wheel.scheduler().ticks();
    lock.last_interval = wheel.last_interval();
    lock.scene = wheel.scene().clone();
}

/// `now + unit`, or `None` (timer stays disarmed) when that overflows `Instant`.
fn next_deadline(unit: Duration) -> Option<Instant> {
    let deadline = Instant::now().checked_add(unit);
    if deadline.is_none() {
        warn!("Tick duration {:?} cannot be scheduled, rotation will not advance", unit);
    }
    deadline
}

/// Own the wheel until shutdown: apply commands as they arrive and tick the
/// rotation once per unit duration while it runs.
///
/// Everything touching the wheel happens on this thread. The tick timer is
/// armed when rotation starts and re-armed after every tick; stopping disarms
/// it, so no tick follows a stop.
pub fn run_wheel_loop(mut wheel: Wheel, handles: LoopHandles) {
    let unit = wheel.scheduler().unit_duration();
    let mut next_tick: Option<Instant> = None;
    publish(&wheel, &handles.display);
    info!("Wheel loop running, unit duration {:?}", unit);

    loop {
        let timer = match next_tick {
            Some(deadline) => channel::at(deadline),
            None => channel::never(),
        };

        select! {
            recv(handles.command_rx) -> msg => {
                let cmd = match msg {
                    Ok(cmd) => cmd,
                    Err(_) => {
                        info!("Shell disconnected, wheel loop exiting");
                        break;
                    }
                };
                let was_running = wheel.scheduler().is_running();
                if process_command(cmd, &mut wheel, &handles.status_tx) == LoopControl::Shutdown {
                    break;
                }
                match (was_running, wheel.scheduler().is_running()) {
                    (false, true) => next_tick = next_deadline(unit),
                    (_, false) => next_tick = None,
                    (true, true) => {}
                }
            },
            recv(timer) -> _ => {
                next_tick = None;
                if let Some(interval) = wheel.tick() {
                    debug!(
                        "Tick {}: {:.2} -> {:.2} deg",
                        interval.tick, interval.initial_deg, interval.final_deg
                    );
                    let _ = handles.status_tx.send(WheelStatus::Rotated(interval));
                    next_tick = next_deadline(unit);
                }
            },
        }

        publish(&wheel, &handles.display);

        #[cfg(feature = "profiling")]
        {
            crate::PROFILER.lock().print_and_clear_every(std::time::Duration::from_secs(5));
        }
    }

    publish(&wheel, &handles.display);
    info!("Wheel loop stopped after {} ticks", wheel.scheduler().ticks());
}
