//! Animation flags, jump/landing edges and sprite facing.
//!
//! Everything here is published best-effort: an absent sink is skipped and
//! never affects motion.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::InputState;
use crate::integrator::MotionState;
use crate::sensor::GroundEdge;
use crate::sinks::{AnimationSink, FacingSink};

/// Axis magnitude above which a grounded avatar counts as running.
pub const RUN_THRESHOLD: f32 = 0.1;
/// Axis magnitude above which facing follows input.
pub const FACING_DEADZONE: f32 = 0.01;

/// Animation parameter identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Float: absolute horizontal speed.
    pub speed_x: String,
    /// Float: signed vertical speed.
    pub speed_y: String,
    /// Bool: ground contact.
    pub grounded: String,
    /// Bool: moving on ground.
    pub running: String,
    /// Bool: jump in progress.
    pub jump: String,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            speed_x: "velocityX".to_string(),
            speed_y: "velocityY".to_string(),
            grounded: "isGrounded".to_string(),
            running: "isRunning".to_string(),
            jump: "Jump".to_string(),
        }
    }
}

impl AnimationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let slots = [
            ("speed_x", &self.speed_x),
            ("speed_y", &self.speed_y),
            ("grounded", &self.grounded),
            ("running", &self.running),
            ("jump", &self.jump),
        ];
        for (slot, name) in slots {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyParameterName(slot));
            }
        }
        Ok(())
    }
}

/// Continuous animation parameters derived from one state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub speed_x: f32,
    pub speed_y: f32,
    pub grounded: bool,
    pub running: bool,
}

impl AnimationFrame {
    pub fn from_state(state: &MotionState, input: &InputState) -> Self {
        Self {
            speed_x: state.velocity.x.abs(),
            speed_y: state.velocity.y,
            grounded: state.is_grounded,
            running: input.move_axis.abs() > RUN_THRESHOLD && state.is_grounded,
        }
    }

    pub fn publish<A>(&self, sink: Option<&mut A>, params: &AnimationParams)
    where
        A: AnimationSink + ?Sized,
    {
        let Some(sink) = sink else {
            return;
        };
        sink.set_float(&params.speed_x, self.speed_x);
        sink.set_float(&params.speed_y, self.speed_y);
        sink.set_bool(&params.grounded, self.grounded);
        sink.set_bool(&params.running, self.running);
    }
}

/// Edge-triggered jump notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpEdge {
    /// Left the ground while rising.
    Started,
    /// Touched down.
    Landed,
}

impl JumpEdge {
    /// Value written to the jump animation bool.
    pub fn jump_flag(self) -> bool {
        matches!(self, Self::Started)
    }

    pub fn publish<A>(self, sink: Option<&mut A>, params: &AnimationParams)
    where
        A: AnimationSink + ?Sized,
    {
        if let Some(sink) = sink {
            sink.set_bool(&params.jump, self.jump_flag());
        }
    }
}

/// Compare the last visual tick's grounded value with the latest sample,
/// then roll `was_grounded` forward.
///
/// Landing clears `jump_released`. Leaving the ground without upward velocity
/// (walking off a ledge) produces no edge. Calling again before the next
/// ground sample returns `None`.
pub fn detect_jump_edge(state: &mut MotionState, input: &mut InputState) -> Option<JumpEdge> {
    let edge = match GroundEdge::between(state.was_grounded, state.is_grounded) {
        Some(GroundEdge::LeftGround) if state.velocity.y > 0.0 => Some(JumpEdge::Started),
        Some(GroundEdge::Landed) => {
            input.jump_released = false;
            Some(JumpEdge::Landed)
        },
        _ => None,
    };
    state.was_grounded = state.is_grounded;
    edge
}

/// Horizontal facing of the sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing implied by `axis`, or `None` inside the deadzone.
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > FACING_DEADZONE {
            Some(Self::Right)
        } else if axis < -FACING_DEADZONE {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn flip_x(self) -> bool {
        self == Self::Left
    }
}

/// Update `facing` from input and push it to the sink. Inside the deadzone
/// neither the facing nor the sink is touched.
pub fn apply_facing<F: FacingSink + ?Sized>(facing: &mut Facing, axis: f32, sink: Option<&mut F>) {
    let Some(next) = Facing::from_axis(axis) else {
        return;
    };
    *facing = next;
    if let Some(sink) = sink {
        sink.set_flip_x(next.flip_x());
    }
}
