pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod integrator;
pub mod notifier;
pub mod sensor;
pub mod sinks;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::MotionConfig;
pub use controller::MotionController;
pub use error::ConfigError;
pub use input::InputState;
pub use integrator::{GravityBranch, MotionState};
pub use notifier::{AnimationFrame, AnimationParams, Facing, JumpEdge};
pub use sensor::{GroundEdge, GroundMask, GroundSensor};
pub use sinks::{AnimationSink, Bindings, FacingSink, GroundProbe, Unbound, VelocitySink};

/// Re-exported so hosts don't need a direct `glam` dependency for inputs.
pub use glam::Vec2;
