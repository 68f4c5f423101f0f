use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notifier::AnimationParams;
use crate::sensor::GroundMask;

/// Horizontal speed at full stick deflection (units/s).
pub const MAX_HORIZONTAL_SPEED: f32 = 10.0;
/// Upward velocity set on a grounded jump (units/s).
pub const JUMP_IMPULSE: f32 = 10.0;
/// Gravity acceleration (units/s^2, downward).
pub const GRAVITY: f32 = -9.81;
/// Gravity multiplier while falling or holding jump.
pub const FALL_GRAVITY_SCALE: f32 = 1.0;
/// Gravity multiplier while rising after an early jump release.
pub const JUMP_CUT_GRAVITY_SCALE: f32 = 5.0;
/// Vertical velocity held while resting on ground.
pub const GROUNDED_SNAP_VELOCITY_Y: f32 = -1.0;

/// Env var naming the motion config file for [`MotionConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "HOPFRAME_MOTION_CONFIG";

/// Tuning for one motion controller, loadable from TOML.
///
/// Immutable once a controller has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub max_horizontal_speed: f32,
    pub jump_impulse: f32,
    /// Signed; negative pulls down.
    pub gravity: f32,
    pub fall_gravity_scale: f32,
    pub jump_cut_gravity_scale: f32,
    pub grounded_snap_velocity_y: f32,
    /// Which surface layers count as ground.
    pub ground_mask: GroundMask,
    /// Identifiers published to the animation sink.
    pub animation: AnimationParams,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_horizontal_speed: MAX_HORIZONTAL_SPEED,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            fall_gravity_scale: FALL_GRAVITY_SCALE,
            jump_cut_gravity_scale: JUMP_CUT_GRAVITY_SCALE,
            grounded_snap_velocity_y: GROUNDED_SNAP_VELOCITY_Y,
            ground_mask: GroundMask::ALL,
            animation: AnimationParams::default(),
        }
    }
}

impl MotionConfig {
    /// Load the file named by `HOPFRAME_MOTION_CONFIG`, if set.
    ///
    /// A set but unreadable or invalid file is an error, never a silent
    /// fallback to defaults.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from(path).map(Some),
            None => Ok(None),
        }
    }

    /// Read, parse and validate a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject tuning mistakes instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_horizontal_speed", self.max_horizontal_speed)?;
        positive("jump_impulse", self.jump_impulse)?;
        finite("gravity", self.gravity)?;
        positive("fall_gravity_scale", self.fall_gravity_scale)?;
        positive("jump_cut_gravity_scale", self.jump_cut_gravity_scale)?;
        finite("grounded_snap_velocity_y", self.grounded_snap_velocity_y)?;
        if self.grounded_snap_velocity_y > 0.0 {
            return Err(ConfigError::PositiveSnap(self.grounded_snap_velocity_y));
        }
        self.animation.validate()
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
