//! Headless console shell for the wheel: reads one command per line from stdin,
//! forwards it to the wheel loop and prints what comes back.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};

use spin_wheel::app::{self, ShellHandles};
use spin_wheel::commands::{WheelCommand, WheelStatus};
use spin_wheel::init_config::InitConfig;
use spin_wheel::scene::{SceneProperties, ShapeId};
use spin_wheel::{Parameter, Wheel};

#[derive(Debug, PartialEq)]
enum ShellAction {
    Send(WheelCommand),
    Show,
    Help,
    Quit,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(InitConfig::default_path);
    let config = InitConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?
        .resolve()
        .context("Invalid configuration")?;

    let wheel = Wheel::new(config).context("Failed to build the wheel")?;
    info!("Readings will be saved to {}", wheel.reading_log().path().display());
    let (shell, join) = app::spawn(wheel).context("Failed to start the wheel loop")?;

    let status_rx = shell.status_rx.clone();
    let printer = std::thread::spawn(move || {
        for status in status_rx.iter() {
            print_status(&status);
        }
    });

    print_help();
    show(&shell);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let scene = shell.display.lock().scene.properties();
        match parse_line(&line, scene) {
            Ok(Some(ShellAction::Send(cmd))) => {
                if shell.command_tx.send(cmd).is_err() {
                    warn!("Wheel loop is gone");
                    break;
                }
            }
            Ok(Some(ShellAction::Show)) => show(&shell),
            Ok(Some(ShellAction::Help)) => print_help(),
            Ok(Some(ShellAction::Quit)) => break,
            Ok(None) => {}
            Err(e) => println!("{}", e),
        }
        io::stdout().flush().ok();
    }

    let _ = shell.command_tx.send(WheelCommand::Shutdown);
    join.join().map_err(|_| anyhow!("Wheel loop panicked"))?;
    drop(shell);
    printer.join().map_err(|_| anyhow!("Status printer panicked"))?;
    Ok(())
}

fn parse_line(line: &str, scene: SceneProperties) -> Result<Option<ShellAction>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let action = match words.as_slice() {
        [] => return Ok(None),
        ["set", name, value] => {
            let parameter: Parameter = name.parse()?;
            ShellAction::Send(WheelCommand::SetParameter {
                parameter,
                value: parse_number(value)?,
            })
        }
        ["scale", value] => scene_command(SceneProperties {
            scale: parse_number(value)? as f32,
            ..scene
        }),
        ["thickness", value] => scene_command(SceneProperties {
            thickness: parse_number(value)? as f32,
            ..scene
        }),
        ["inner", value] => scene_command(SceneProperties {
            inner_radius_px: parse_number(value)? as f32,
            ..scene
        }),
        ["invert", flag] => {
            let inverted = match *flag {
                "on" => true,
                "off" => false,
                _ => return Err(format!("Expected on/off, got {}", flag)),
            };
            scene_command(SceneProperties { inverted, ..scene })
        }
        ["start"] | ["engage"] => ShellAction::Send(WheelCommand::StartRotation),
        ["stop"] => ShellAction::Send(WheelCommand::StopRotation),
        ["reset"] => ShellAction::Send(WheelCommand::ResetRotation),
        ["record"] => ShellAction::Send(WheelCommand::RecordReading),
        ["show"] => ShellAction::Show,
        ["help"] => ShellAction::Help,
        ["quit"] | ["exit"] => ShellAction::Quit,
        _ => return Err(format!("Unknown command: {} (try 'help')", line.trim())),
    };
    Ok(Some(action))
}

fn scene_command(properties: SceneProperties) -> ShellAction {
    ShellAction::Send(WheelCommand::SetSceneProperties(properties))
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Not a number: {}", value))
}

fn print_status(status: &WheelStatus) {
    match status {
        WheelStatus::Evaluated(r) => println!(
            "Linear velocity {:.3} um/s | DEP {:.4} pN | Centripetal force {:.6} pN",
            r.linear_velocity_um_s, r.drag_force_pn, r.centripetal_force_pn
        ),
        WheelStatus::Rotated(interval) => debug!(
            "Tick {}: {:.2} -> {:.2} deg",
            interval.tick, interval.initial_deg, interval.final_deg
        ),
        WheelStatus::RunState(state) => println!("Rotation {:?}", state),
        WheelStatus::SceneUpdated(props) => println!(
            "Scene: scale {} thickness {} inner radius {} inverted {}",
            props.scale, props.thickness, props.inner_radius_px, props.inverted
        ),
        WheelStatus::Recorded(path) => println!("Saved to file {}", path.display()),
        WheelStatus::Rejected(message) => println!("Rejected: {}", message),
    }
}

fn show(shell: &ShellHandles) {
    let display = shell.display.lock().clone();
    let s = display.snapshot;
    let r = display.result;
    println!("Parameters:");
    for parameter in Parameter::ALL {
        println!("  {:<24} {} {}", parameter.field_name(), s.get(parameter), parameter.unit());
    }
    println!("Results:");
    println!("  linear velocity          {:.3} um/s", r.linear_velocity_um_s);
    println!("  DEP (drag) force         {:.4} pN", r.drag_force_pn);
    println!("  centripetal force        {:.6} pN", r.centripetal_force_pn);
    println!(
        "Rotation: {:?}, {} ticks, angle {:.2} deg",
        display.run_state, display.ticks, display.cumulative_angle_deg
    );
    if let Some(interval) = display.last_interval {
        println!(
            "  tick {}: {:.2} -> {:.2} deg (midway {:.2} deg)",
            interval.tick,
            interval.initial_deg,
            interval.final_deg,
            interval.angle_at(0.5)
        );
    }
    for id in [ShapeId::VerticalAxis, ShapeId::HorizontalAxis] {
        if let Some((from, to)) = display.scene.transformed_axis(id) {
            println!(
                "  {:?}: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                id, from.x, from.y, to.x, to.y
            );
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  set <omega|distance|diameter|density|viscosity> <value>");
    println!("  scale <value> | thickness <value> | inner <radius px> | invert on|off");
    println!("  start | stop | reset");
    println!("  record        append the current reading to the log file");
    println!("  show | help | quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<ShellAction>, String> {
        parse_line(line, SceneProperties::default())
    }

    #[test]
    fn parses_parameter_updates() {
        assert_eq!(
            parse("set omega 2.5"),
            Ok(Some(ShellAction::Send(WheelCommand::SetParameter {
                parameter: Parameter::AngularVelocity,
                value: 2.5,
            })))
        );
        assert!(parse("set omega fast").is_err());
        assert!(parse("set spin 2").is_err());
    }

    #[test]
    fn scene_commands_keep_other_properties() {
        let current = SceneProperties {
            scale: 2.0,
            ..SceneProperties::default()
        };
        match parse_line("invert on", current) {
            Ok(Some(ShellAction::Send(WheelCommand::SetSceneProperties(p)))) => {
                assert!(p.inverted);
                assert_eq!(p.scale, 2.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse("invert maybe").is_err());
    }

    #[test]
    fn parses_control_words() {
        assert_eq!(parse("start"), Ok(Some(ShellAction::Send(WheelCommand::StartRotation))));
        assert_eq!(parse("  stop "), Ok(Some(ShellAction::Send(WheelCommand::StopRotation))));
        assert_eq!(parse("quit"), Ok(Some(ShellAction::Quit)));
        assert_eq!(parse(""), Ok(None));
        assert!(parse("spin faster").is_err());
    }
}
