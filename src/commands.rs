// commands.rs
// Messages the shell sends to the wheel loop and the status events it gets back.

use std::path::PathBuf;

use crossbeam::channel::{Receiver, Sender};

use crate::parameters::{Parameter, ParameterSnapshot};
use crate::physics::PhysicsResult;
use crate::rotation::{RotationInterval, RunState};
use crate::scene::SceneProperties;

mod dispatcher;

pub use dispatcher::{process_command, LoopControl};

#[derive(Clone, Debug, PartialEq)]
pub enum WheelCommand {
    /// Replace the whole snapshot
    SetParameters(ParameterSnapshot),
    /// Change one field of the live snapshot
    SetParameter { parameter: Parameter, value: f64 },
    SetSceneProperties(SceneProperties),
    StartRotation,
    StopRotation,
    ResetRotation,
    RecordReading,
    Shutdown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WheelStatus {
    Evaluated(PhysicsResult),
    Rotated(RotationInterval),
    RunState(RunState),
    SceneUpdated(SceneProperties),
    Recorded(PathBuf),
    Rejected(String),
}

pub type CommandSender = Sender<WheelCommand>;
pub type CommandReceiver = Receiver<WheelCommand>;
pub type StatusSender = Sender<WheelStatus>;
pub type StatusReceiver = Receiver<WheelStatus>;
