use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel;
use parking_lot::Mutex;

use crate::commands::{CommandReceiver, CommandSender, StatusReceiver, StatusSender};
use crate::wheel::Wheel;

pub mod wheel_loop;

#[cfg(test)]
mod tests;

pub use wheel_loop::{publish, run_wheel_loop, DisplayState};

pub type SharedDisplay = Arc<Mutex<DisplayState>>;

/// The shell's end: send commands, read status events and the published display.
#[derive(Debug, Clone)]
pub struct ShellHandles {
    pub command_tx: CommandSender,
    pub status_rx: StatusReceiver,
    pub display: SharedDisplay,
}

/// The wheel loop's end.
#[derive(Debug)]
pub struct LoopHandles {
    pub command_rx: CommandReceiver,
    pub status_tx: StatusSender,
    pub display: SharedDisplay,
}

pub fn create_channels() -> (ShellHandles, LoopHandles) {
    let (command_tx, command_rx) = channel::unbounded();
    let (status_tx, status_rx) = channel::unbounded();
    let display = Arc::new(Mutex::new(DisplayState::default()));
    (
        ShellHandles {
            command_tx,
            status_rx,
            display: display.clone(),
        },
        LoopHandles {
            command_rx,
            status_tx,
            display,
        },
    )
}

/// Move the wheel onto its own thread and hand back the shell's handles.
pub fn spawn(wheel: Wheel) -> std::io::Result<(ShellHandles, JoinHandle<()>)> {
    let (shell, handles) = create_channels();
    let join = std::thread::Builder::new()
        .name("wheel-loop".into())
        .spawn(move || run_wheel_loop(wheel, handles))?;
    Ok((shell, join))
}
