use std::path::Path;

use serde::{Deserialize, Serialize};

use hopframe_core::MotionConfig;

use crate::error::ReplayError;
use crate::script::ScriptEvent;
use crate::stage::StageConfig;

/// Simulation and render cadences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Fixed simulation rate.
    pub sim_hz: f32,
    /// Visual tick rate. Usually higher than `sim_hz`.
    pub render_hz: f32,
    /// Cap on simulation ticks run inside one visual frame.
    pub max_substeps: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            sim_hz: 50.0,
            render_hz: 144.0,
            max_substeps: 5,
        }
    }
}

impl ClockConfig {
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.sim_hz
    }

    pub fn frame_dt(&self) -> f32 {
        1.0 / self.render_hz
    }

    pub fn validate(&self) -> Result<(), ReplayError> {
        for (name, hz) in [("sim_hz", self.sim_hz), ("render_hz", self.render_hz)] {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(ReplayError::InvalidClock(format!("{name} must be > 0, got {hz}")));
            }
        }
        if self.max_substeps == 0 {
            return Err(ReplayError::InvalidClock("max_substeps must be > 0".to_string()));
        }
        Ok(())
    }
}

/// A complete replay file: tuning, stage, clock and input timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub duration_secs: f32,
    pub clock: ClockConfig,
    pub motion: MotionConfig,
    pub stage: StageConfig,
    pub events: Vec<ScriptEvent>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            duration_secs: 3.0,
            clock: ClockConfig::default(),
            motion: MotionConfig::default(),
            stage: StageConfig::default(),
            events: Vec::new(),
        }
    }
}

impl ReplayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ReplayError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ReplayError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReplayError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ReplayError> {
        self.clock.validate()?;
        self.motion.validate()?;
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(ReplayError::InvalidScript(format!(
                "duration_secs must be >= 0, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }
}
