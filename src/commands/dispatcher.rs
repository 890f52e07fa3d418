use log::{debug, error};

use crate::profile_scope;
use crate::wheel::Wheel;

use super::{StatusSender, WheelCommand, WheelStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Shutdown,
}

/// Process a single `WheelCommand` against the wheel and report what changed.
///
/// A disconnected status receiver is not an error; the shell may have gone
/// away while the loop is still draining commands.
pub fn process_command(cmd: WheelCommand, wheel: &mut Wheel, status_tx: &StatusSender) -> LoopControl {
    profile_scope!("command_handling");
    let send = |status: WheelStatus| {
        let _ = status_tx.send(status);
    };

    match cmd {
        WheelCommand::SetParameters(snapshot) => match wheel.on_parameters_changed(snapshot) {
            Ok(result) => send(WheelStatus::Evaluated(result)),
            Err(e) => send(WheelStatus::Rejected(e.to_string())),
        },
        WheelCommand::SetParameter { parameter, value } => {
            let snapshot = wheel.snapshot().with(parameter, value);
            match wheel.on_parameters_changed(snapshot) {
                Ok(result) => send(WheelStatus::Evaluated(result)),
                Err(e) => send(WheelStatus::Rejected(e.to_string())),
            }
        }
        WheelCommand::SetSceneProperties(properties) => {
            match wheel.set_scene_properties(properties) {
                Ok(()) => send(WheelStatus::SceneUpdated(properties)),
                Err(e) => send(WheelStatus::Rejected(e.to_string())),
            }
        }
        WheelCommand::StartRotation => {
            if let Some(interval) = wheel.start_rotation() {
                send(WheelStatus::RunState(wheel.run_state()));
                send(WheelStatus::Rotated(interval));
            }
        }
        WheelCommand::StopRotation => {
            if wheel.stop_rotation() {
                send(WheelStatus::RunState(wheel.run_state()));
            }
        }
        WheelCommand::ResetRotation => {
            wheel.reset_rotation();
            send(WheelStatus::RunState(wheel.run_state()));
        }
        WheelCommand::RecordReading => match wheel.record_reading() {
            Ok(path) => send(WheelStatus::Recorded(path)),
            Err(e) => {
                error!("Failed to record reading: {}", e);
                send(WheelStatus::Rejected(e.to_string()));
            }
        },
        WheelCommand::Shutdown => {
            debug!("Shutdown requested");
            return LoopControl::Shutdown;
        }
    }
    LoopControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;
    use crate::parameters::Parameter;
    use crate::recording::ReadingLog;
    use crate::rotation::RunState;
    use crossbeam::channel;

    fn setup() -> (Wheel, StatusSender, crate::commands::StatusReceiver) {
        let dir = std::env::temp_dir().join(format!("spin_wheel_dispatch_{}", std::process::id()));
        let wheel = Wheel::with_reading_log(WheelConfig::default(), ReadingLog::start_now(dir));
        let (tx, rx) = channel::unbounded();
        (wheel, tx, rx)
    }

    #[test]
    fn set_parameter_reports_evaluation() {
        let (mut wheel, tx, rx) = setup();
        let cmd = WheelCommand::SetParameter {
            parameter: Parameter::AngularVelocity,
            value: 2.0,
        };
        assert_eq!(process_command(cmd, &mut wheel, &tx), LoopControl::Continue);
        match rx.try_recv() {
            Ok(WheelStatus::Evaluated(result)) => assert_eq!(result, wheel.result()),
            other => panic!("expected evaluation, got {:?}", other),
        }
        assert_eq!(wheel.snapshot().angular_velocity_rps, 2.0);
    }

    #[test]
    fn invalid_parameter_is_rejected() {
        let (mut wheel, tx, rx) = setup();
        let cmd = WheelCommand::SetParameter {
            parameter: Parameter::Viscosity,
            value: f64::NAN,
        };
        process_command(cmd, &mut wheel, &tx);
        assert!(matches!(rx.try_recv(), Ok(WheelStatus::Rejected(_))));
        assert_eq!(wheel.snapshot().fluid_viscosity_mpa_s, 1.0);
    }

    #[test]
    fn start_reports_state_then_first_interval() {
        let (mut wheel, tx, rx) = setup();
        process_command(WheelCommand::StartRotation, &mut wheel, &tx);
        assert_eq!(rx.try_recv().ok(), Some(WheelStatus::RunState(RunState::Running)));
        assert!(matches!(rx.try_recv(), Ok(WheelStatus::Rotated(i)) if i.tick == 1));

        // second start is silent
        process_command(WheelCommand::StartRotation, &mut wheel, &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stop_when_idle_is_silent() {
        let (mut wheel, tx, rx) = setup();
        process_command(WheelCommand::StopRotation, &mut wheel, &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn shutdown_ends_the_loop() {
        let (mut wheel, tx, _rx) = setup();
        assert_eq!(
            process_command(WheelCommand::Shutdown, &mut wheel, &tx),
            LoopControl::Shutdown
        );
    }

    #[test]
    fn disconnected_shell_does_not_panic() {
        let (mut wheel, tx, rx) = setup();
        drop(rx);
        process_command(WheelCommand::StartRotation, &mut wheel, &tx);
        assert!(wheel.scheduler().is_running());
    }
}
