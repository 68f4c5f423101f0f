use glam::Vec2;

use crate::config::MotionConfig;
use crate::error::ConfigError;
use crate::input::InputState;
use crate::integrator::{MotionState, StepOutcome, step_velocity};
use crate::notifier::{AnimationFrame, Facing, JumpEdge, apply_facing, detect_jump_edge};
use crate::sensor::GroundSensor;
use crate::sinks::{AnimationSink, Bindings, FacingSink, GroundProbe, Unbound, VelocitySink};

/// Platformer motion controller for a single avatar.
///
/// The host calls [`simulation_step`](Self::simulation_step) at the physics
/// cadence and [`visual_step`](Self::visual_step) at the render cadence;
/// input callbacks may land between them at any time. The controller owns no
/// timer or thread.
pub struct MotionController<G, V, A = Unbound, F = Unbound> {
    config: MotionConfig,
    sensor: GroundSensor,
    motion: MotionState,
    input: InputState,
    facing: Facing,
    control_enabled: bool,
    bindings: Bindings<G, V, A, F>,
}

impl<G, V, A, F> MotionController<G, V, A, F>
where
    G: GroundProbe,
    V: VelocitySink,
    A: AnimationSink,
    F: FacingSink,
{
    /// Validate `config` and build a controller at rest, airborne, facing
    /// right, with control enabled.
    pub fn new(config: MotionConfig, bindings: Bindings<G, V, A, F>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sensor: GroundSensor::new(config.ground_mask),
            config,
            motion: MotionState::default(),
            input: InputState::default(),
            facing: Facing::default(),
            control_enabled: true,
            bindings,
        })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.motion.is_grounded
    }

    pub fn bindings(&self) -> &Bindings<G, V, A, F> {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings<G, V, A, F> {
        &mut self.bindings
    }

    pub fn into_bindings(self) -> Bindings<G, V, A, F> {
        self.bindings
    }

    pub fn control_enabled(&self) -> bool {
        self.control_enabled
    }

    /// Suppress or restore input. Current velocity and latched input are kept.
    pub fn set_control_enabled(&mut self, enabled: bool) {
        if self.control_enabled != enabled {
            tracing::debug!(enabled, "motion control toggled");
        }
        self.control_enabled = enabled;
    }

    /// Movement-axis callback.
    pub fn on_move_axis(&mut self, axis: Vec2) {
        self.input.set_move_axis(axis, self.control_enabled);
    }

    /// Jump button callback. A press and a release reported together are
    /// applied in that order.
    pub fn on_jump_phase(&mut self, started: bool, canceled: bool) {
        if started {
            self.on_jump_edge(true);
        }
        if canceled {
            self.on_jump_edge(false);
        }
    }

    pub fn on_jump_edge(&mut self, pressed: bool) {
        self.input.on_jump_edge(pressed, self.control_enabled);
    }

    /// One fixed simulation tick: sample ground, integrate velocity, hand it
    /// to the body and publish continuous animation parameters.
    pub fn simulation_step(&mut self, dt: f32) -> Vec2 {
        self.motion.is_grounded = self.sensor.sample(&self.bindings.ground);

        let StepOutcome {
            velocity,
            jumped,
            gravity,
        } = step_velocity(&mut self.motion, &mut self.input, &self.config, dt);

        if jumped {
            tracing::debug!(impulse = self.config.jump_impulse, "jump impulse applied");
        }
        tracing::trace!(
            vx = velocity.x,
            vy = velocity.y,
            grounded = self.motion.is_grounded,
            ?gravity,
            "simulation step"
        );

        self.bindings.body.set_velocity(velocity);
        self.publish_frame();
        velocity
    }

    /// One render tick: facing, jump edges and continuous animation
    /// parameters.
    ///
    /// Edges compare against the latest simulation sample, so repeated calls
    /// between two simulation ticks report each transition once.
    pub fn visual_step(&mut self) -> Option<JumpEdge> {
        apply_facing(
            &mut self.facing,
            self.input.move_axis,
            self.bindings.facing.as_mut(),
        );

        let edge = detect_jump_edge(&mut self.motion, &mut self.input);
        if let Some(edge) = edge {
            tracing::debug!(?edge, vy = self.motion.velocity.y, "ground transition");
            edge.publish(self.bindings.animator.as_mut(), &self.config.animation);
        }

        self.publish_frame();
        edge
    }

    /// Continuous animation parameters for the current state.
    pub fn animation_frame(&self) -> AnimationFrame {
        AnimationFrame::from_state(&self.motion, &self.input)
    }

    fn publish_frame(&mut self) {
        let frame = self.animation_frame();
        frame.publish(self.bindings.animator.as_mut(), &self.config.animation);
    }
}
