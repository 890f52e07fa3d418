// wheel.rs
// The Wheel owns everything the shell can change: the live parameter snapshot,
// the last physics result, the rotation scheduler, the scene and the reading log.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::WheelConfig;
use crate::error::WheelResult;
use crate::parameters::ParameterSnapshot;
use crate::physics::{evaluate, PhysicsResult};
use crate::recording::{ReadingLog, ReadingRecord};
use crate::rotation::{RotationInterval, RotationScheduler, RunState};
use crate::scene::{SceneProperties, WheelScene};

pub struct Wheel {
    snapshot: ParameterSnapshot,
    result: PhysicsResult,
    scheduler: RotationScheduler,
    scene: WheelScene,
    reading_log: ReadingLog,
    last_interval: Option<RotationInterval>,
}

impl Wheel {
    /// Build a wheel from a configuration. The configuration is validated and
    /// the initial snapshot evaluated, as the control panel does on start-up.
    pub fn new(config: WheelConfig) -> WheelResult<Self> {
        config.validate()?;
        let reading_log = ReadingLog::start_now(&config.recording.output_dir);
        Ok(Self::with_reading_log(config, reading_log))
    }

    pub fn with_reading_log(config: WheelConfig, reading_log: ReadingLog) -> Self {
        let snapshot = config.parameters;
        Self {
            snapshot,
            result: evaluate(&snapshot),
            scheduler: RotationScheduler::new(config.rotation.unit_duration()),
            scene: WheelScene::new(config.scene),
            reading_log,
            last_interval: None,
        }
    }

    /// Validate and store a new snapshot, then recompute. An invalid snapshot is
    /// rejected and the previous one stays live.
    pub fn on_parameters_changed(&mut self, snapshot: ParameterSnapshot) -> WheelResult<PhysicsResult> {
        if let Err(e) = snapshot.validate() {
            warn!("Rejected parameter update: {}", e);
            return Err(e);
        }
        self.snapshot = snapshot;
        self.result = evaluate(&snapshot);
        debug!(
            "Recomputed: v = {:.3} um/s, DEP = {:.4} pN, Fc = {:.6} pN",
            self.result.linear_velocity_um_s,
            self.result.drag_force_pn,
            self.result.centripetal_force_pn
        );
        Ok(self.result)
    }

    /// Start rotating and run the first tick immediately. `None` when the wheel
    /// is already rotating.
    pub fn start_rotation(&mut self) -> Option<RotationInterval> {
        if !self.scheduler.start() {
            debug!("Start ignored: rotation already running");
            return None;
        }
        info!(
            "Rotation started at {:.1} deg, {} rps",
            self.scheduler.cumulative_angle_deg(),
            self.snapshot.angular_velocity_rps
        );
        self.tick()
    }

    /// One scheduler tick against the live snapshot.
    pub fn tick(&mut self) -> Option<RotationInterval> {
        let interval = self.scheduler.on_tick(self.snapshot.angular_velocity_rps)?;
        self.scene.set_rotation(interval.initial_deg);
        self.last_interval = Some(interval);
        Some(interval)
    }

    pub fn stop_rotation(&mut self) -> bool {
        let stopped = self.scheduler.stop();
        if stopped {
            info!(
                "Rotation stopped after {} ticks at {:.1} deg",
                self.scheduler.ticks(),
                self.scheduler.cumulative_angle_deg()
            );
        }
        stopped
    }

    /// Re-initialize the rotation: stop and return to angle 0.
    pub fn reset_rotation(&mut self) {
        self.scheduler.reset();
        self.scene.set_rotation(0.0);
        self.last_interval = None;
        info!("Rotation reset");
    }

    pub fn set_scene_properties(&mut self, properties: SceneProperties) -> WheelResult<()> {
        properties.validate()?;
        self.scene.apply_properties(properties);
        Ok(())
    }

    /// Append the current settings and results to the reading log.
    pub fn record_reading(&self) -> WheelResult<PathBuf> {
        let properties = self.scene.properties();
        let record = ReadingRecord {
            scale: properties.scale,
            thickness: properties.thickness,
            parameters: self.snapshot,
            result: self.result,
        };
        self.reading_log.append(&record)?;
        info!("Saved to file {}", self.reading_log.path().display());
        Ok(self.reading_log.path().to_path_buf())
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        self.snapshot
    }

    pub fn result(&self) -> PhysicsResult {
        self.result
    }

    pub fn scheduler(&self) -> &RotationScheduler {
        &self.scheduler
    }

    pub fn run_state(&self) -> RunState {
        self.scheduler.run_state()
    }

    pub fn scene(&self) -> &WheelScene {
        &self.scene
    }

    pub fn last_interval(&self) -> Option<RotationInterval> {
        self.last_interval
    }

    pub fn reading_log(&self) -> &ReadingLog {
        &self.reading_log
    }
}
