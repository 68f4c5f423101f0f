//! Collaborator seams.
//!
//! The controller never talks to an engine directly. It reads ground contact
//! through a [`GroundProbe`] and writes through the three sink traits; the
//! host wires concrete implementations in at construction.

use glam::Vec2;

use crate::sensor::GroundMask;

/// Source of the per-tick ground contact signal.
pub trait GroundProbe {
    /// Whether the sensor region overlaps any surface on a layer in `mask`.
    fn is_touching(&self, mask: GroundMask) -> bool;
}

/// Receives the velocity intent once per simulation tick.
pub trait VelocitySink {
    fn set_velocity(&mut self, velocity: Vec2);
}

/// Named animation parameters.
pub trait AnimationSink {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
}

/// Horizontal sprite flip.
pub trait FacingSink {
    fn set_flip_x(&mut self, flip_x: bool);
}

/// Probe that always reports the same contact state.
impl GroundProbe for bool {
    fn is_touching(&self, _mask: GroundMask) -> bool {
        *self
    }
}

/// Stores the last velocity it was handed.
impl VelocitySink for Vec2 {
    fn set_velocity(&mut self, velocity: Vec2) {
        *self = velocity;
    }
}

/// Collaborators wired into one controller.
///
/// `animator` and `facing` are optional; publishing to an absent sink is
/// skipped without affecting the velocity computation.
pub struct Bindings<G, V, A, F> {
    pub ground: G,
    pub body: V,
    pub animator: Option<A>,
    pub facing: Option<F>,
}

/// Placeholder for bindings with no animation or facing sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbound;

impl AnimationSink for Unbound {
    fn set_float(&mut self, _name: &str, _value: f32) {}
    fn set_bool(&mut self, _name: &str, _value: bool) {}
}

impl FacingSink for Unbound {
    fn set_flip_x(&mut self, _flip_x: bool) {}
}

impl<G, V> Bindings<G, V, Unbound, Unbound> {
    /// Ground probe and velocity sink only.
    pub fn headless(ground: G, body: V) -> Self {
        Self {
            ground,
            body,
            animator: None,
            facing: None,
        }
    }
}

impl<G, V, A, F> Bindings<G, V, A, F> {
    pub fn new(ground: G, body: V, animator: Option<A>, facing: Option<F>) -> Self {
        Self {
            ground,
            body,
            animator,
            facing,
        }
    }
}
