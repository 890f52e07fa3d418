// Wheel loop tests: commands and ticks driven through the real channels and timer.

use std::time::Duration;

use approx::assert_relative_eq;

use super::*;
use crate::commands::{WheelCommand, WheelStatus};
use crate::config::WheelConfig;
use crate::parameters::Parameter;
use crate::recording::ReadingLog;
use crate::rotation::{RotationInterval, RunState};

const UNIT_S: f64 = 0.02;
const WAIT: Duration = Duration::from_secs(2);

fn spawn_wheel() -> (ShellHandles, std::thread::JoinHandle<()>) {
    let mut cfg = WheelConfig::default();
    cfg.rotation.unit_duration_s = UNIT_S;
    let dir = std::env::temp_dir().join(format!(
        "spin_wheel_loop_{}_{}",
        std::process::id(),
        fastrand::u32(..)
    ));
    cfg.recording.output_dir = dir.clone();
    let wheel = Wheel::with_reading_log(cfg, ReadingLog::start_now(dir));
    spawn(wheel).expect("spawn wheel loop")
}

fn next_rotation(shell: &ShellHandles) -> RotationInterval {
    loop {
        match shell.status_rx.recv_timeout(WAIT) {
            Ok(WheelStatus::Rotated(interval)) => return interval,
            Ok(_) => continue,
            Err(e) => panic!("no rotation received: {:?}", e),
        }
    }
}

fn shutdown(shell: ShellHandles, join: std::thread::JoinHandle<()>) {
    shell.command_tx.send(WheelCommand::Shutdown).unwrap();
    join.join().expect("wheel loop panicked");
}

#[test]
fn rotation_ticks_repeat_until_stopped() {
    let (shell, join) = spawn_wheel();
    shell.command_tx.send(WheelCommand::StartRotation).unwrap();

    let mut last = next_rotation(&shell);
    assert_eq!(last.tick, 1);
    for expected in 2..=4 {
        let interval = next_rotation(&shell);
        assert_eq!(interval.tick, expected);
        assert_eq!(interval.initial_deg, last.final_deg);
        assert_relative_eq!(interval.sweep_deg(), 360.0 * UNIT_S, epsilon = 1e-9);
        last = interval;
    }

    shell.command_tx.send(WheelCommand::StopRotation).unwrap();
    // drain until the stop is acknowledged
    loop {
        match shell.status_rx.recv_timeout(WAIT) {
            Ok(WheelStatus::RunState(RunState::Idle)) => break,
            Ok(_) => continue,
            Err(e) => panic!("stop not acknowledged: {:?}", e),
        }
    }
    let ticks_at_stop = shell.display.lock().ticks;

    std::thread::sleep(Duration::from_secs_f64(UNIT_S * 5.0));
    assert!(
        !shell
            .status_rx
            .try_iter()
            .any(|s| matches!(s, WheelStatus::Rotated(_))),
        "no tick may follow a stop"
    );
    let display = shell.display.lock().clone();
    assert_eq!(display.ticks, ticks_at_stop);
    assert_eq!(display.run_state, RunState::Idle);

    shutdown(shell, join);
}

#[test]
fn reset_while_running_disarms_the_timer() {
    let (shell, join) = spawn_wheel();
    shell.command_tx.send(WheelCommand::StartRotation).unwrap();
    next_rotation(&shell);
    next_rotation(&shell);

    shell.command_tx.send(WheelCommand::ResetRotation).unwrap();
    loop {
        match shell.status_rx.recv_timeout(WAIT) {
            Ok(WheelStatus::RunState(RunState::Idle)) => break,
            Ok(_) => continue,
            Err(e) => panic!("reset not acknowledged: {:?}", e),
        }
    }

    std::thread::sleep(Duration::from_secs_f64(UNIT_S * 5.0));
    assert!(
        !shell
            .status_rx
            .try_iter()
            .any(|s| matches!(s, WheelStatus::Rotated(_))),
        "no tick may follow a reset"
    );
    let display = shell.display.lock().clone();
    assert_eq!(display.run_state, RunState::Idle);
    assert_eq!(display.ticks, 0);
    assert_eq!(display.cumulative_angle_deg, 0.0);
    assert!(display.last_interval.is_none());

    // a fresh start begins a new chain from zero
    shell.command_tx.send(WheelCommand::StartRotation).unwrap();
    let first = next_rotation(&shell);
    assert_eq!(first.tick, 1);
    assert_eq!(first.initial_deg, 0.0);

    shutdown(shell, join);
}

#[test]
fn double_start_keeps_a_single_tick_chain() {
    let (shell, join) = spawn_wheel();
    shell.command_tx.send(WheelCommand::StartRotation).unwrap();
    shell.command_tx.send(WheelCommand::StartRotation).unwrap();

    let mut ticks = Vec::new();
    for _ in 0..5 {
        ticks.push(next_rotation(&shell).tick);
    }
    assert_eq!(ticks, vec![1, 2, 3, 4, 5]);

    shutdown(shell, join);
}

#[test]
fn speed_change_is_seen_by_the_next_tick() {
    let (shell, join) = spawn_wheel();
    shell.command_tx.send(WheelCommand::StartRotation).unwrap();
    let first = next_rotation(&shell);
    assert_relative_eq!(first.sweep_deg(), 360.0 * UNIT_S, epsilon = 1e-9);

    shell
        .command_tx
        .send(WheelCommand::SetParameter {
            parameter: Parameter::AngularVelocity,
            value: 3.0,
        })
        .unwrap();
    loop {
        match shell.status_rx.recv_timeout(WAIT) {
            Ok(WheelStatus::Evaluated(_)) => break,
            Ok(_) => continue,
            Err(e) => panic!("no evaluation: {:?}", e),
        }
    }
    let after = next_rotation(&shell);
    assert_relative_eq!(after.sweep_deg(), 3.0 * 360.0 * UNIT_S, epsilon = 1e-9);

    shutdown(shell, join);
}

#[test]
fn display_reflects_parameters_and_scene() {
    let (shell, join) = spawn_wheel();
    let snapshot = crate::parameters::ParameterSnapshot::new(2.0, 50.0, 10.0, 1.05, 1.0);
    shell.command_tx.send(WheelCommand::SetParameters(snapshot)).unwrap();
    let result = match shell.status_rx.recv_timeout(WAIT) {
        Ok(WheelStatus::Evaluated(result)) => result,
        other => panic!("expected evaluation, got {:?}", other),
    };

    let props = crate::scene::SceneProperties {
        inverted: true,
        ..Default::default()
    };
    shell.command_tx.send(WheelCommand::SetSceneProperties(props)).unwrap();
    assert_eq!(
        shell.status_rx.recv_timeout(WAIT).ok(),
        Some(WheelStatus::SceneUpdated(props))
    );

    shutdown(shell.clone(), join);
    let display = shell.display.lock();
    assert_eq!(display.snapshot, snapshot);
    assert_eq!(display.result, result);
    assert!(display.scene.properties().inverted);
}

#[test]
fn record_reading_reports_the_log_path() {
    let (shell, join) = spawn_wheel();
    shell.command_tx.send(WheelCommand::RecordReading).unwrap();
    let path = match shell.status_rx.recv_timeout(WAIT) {
        Ok(WheelStatus::Recorded(path)) => path,
        other => panic!("expected recorded path, got {:?}", other),
    };
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(crate::recording::TITLE_LINE));
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }

    shutdown(shell, join);
}

#[test]
fn dropping_the_shell_ends_the_loop() {
    let (shell, join) = spawn_wheel();
    drop(shell);
    join.join().expect("wheel loop panicked");
}
