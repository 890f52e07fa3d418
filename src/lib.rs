//! spin_wheel - interactive model of a spinning annular wheel used to reason
//! about particle separation in a rotating microfluidic device.
//!
//! - **physics**: closed-form linear velocity, drag-equivalent (DEP) force and
//!   centripetal force for one snapshot of parameters
//! - **rotation**: the Idle/Running tick scheduler that advances the wheel angle
//! - **wheel**: the explicitly owned object tying snapshot, scheduler, scene and
//!   reading log together
//! - **app**: the wheel loop thread and the channels the shell talks through

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod init_config;
pub mod parameters;
pub mod physics;
pub mod profiler;
pub mod recording;
pub mod rotation;
pub mod scene;
pub mod units;
pub mod wheel;

pub use error::{WheelError, WheelResult};
pub use parameters::{Parameter, ParameterSnapshot};
pub use physics::{evaluate, PhysicsResult};
pub use rotation::{RotationInterval, RotationScheduler, RunState};
pub use wheel::Wheel;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
