//! Recording collaborators for tests.

use std::collections::HashMap;

use glam::Vec2;

use crate::sensor::GroundMask;
use crate::sinks::{AnimationSink, Bindings, FacingSink, GroundProbe};

/// Ground probe driven by the test: touching `layers` while `touching`.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedGround {
    pub touching: bool,
    pub layers: GroundMask,
}

impl Default for ScriptedGround {
    fn default() -> Self {
        Self {
            touching: false,
            layers: GroundMask::ALL,
        }
    }
}

impl GroundProbe for ScriptedGround {
    fn is_touching(&self, mask: GroundMask) -> bool {
        self.touching && self.layers.intersects(mask)
    }
}

/// Animation sink that keeps the latest values and every bool write.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    pub floats: HashMap<String, f32>,
    pub bools: HashMap<String, bool>,
    pub bool_writes: Vec<(String, bool)>,
}

impl RecordingAnimator {
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Every value written to `name`, oldest first.
    pub fn bool_history(&self, name: &str) -> Vec<bool> {
        self.bool_writes
            .iter()
            .filter(|(n, _)| n == name)
            .map(|&(_, v)| v)
            .collect()
    }
}

impl AnimationSink for RecordingAnimator {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
        self.bool_writes.push((name.to_string(), value));
    }
}

/// Facing sink that logs every flip write.
#[derive(Debug, Clone, Default)]
pub struct RecordingFacing {
    pub flips: Vec<bool>,
}

impl FacingSink for RecordingFacing {
    fn set_flip_x(&mut self, flip_x: bool) {
        self.flips.push(flip_x);
    }
}

pub type TestBindings = Bindings<ScriptedGround, Vec2, RecordingAnimator, RecordingFacing>;

impl Bindings<ScriptedGround, Vec2, RecordingAnimator, RecordingFacing> {
    /// Airborne scripted ground, a `Vec2` body and both recording sinks.
    pub fn recording() -> Self {
        Self::new(
            ScriptedGround::default(),
            Vec2::ZERO,
            Some(RecordingAnimator::default()),
            Some(RecordingFacing::default()),
        )
    }
}
