use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use hopframe_core::{
    AnimationFrame, AnimationSink, Bindings, Facing, FacingSink, JumpEdge, MotionController,
};

use crate::config::{ClockConfig, ReplayConfig};
use crate::error::ReplayError;
use crate::script::{InputAction, InputScript, ScriptEvent};
use crate::stage::{SharedStage, Stage, StageBody, StageProbe};

/// Current animation parameter values, as an animator would hold them.
#[derive(Debug, Clone, Default)]
pub struct ParamTable {
    pub floats: HashMap<String, f32>,
    pub bools: HashMap<String, bool>,
}

impl AnimationSink for ParamTable {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }
}

/// Sprite flip state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteFlip(pub bool);

impl FacingSink for SpriteFlip {
    fn set_flip_x(&mut self, flip_x: bool) {
        self.0 = flip_x;
    }
}

type ReplayController = MotionController<StageProbe, StageBody, ParamTable, SpriteFlip>;

/// One visual tick of a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub frame: u32,
    pub time: f32,
    /// Simulation ticks run since the previous visual tick.
    pub sim_steps: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub flip_x: bool,
    pub jump: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<JumpEdge>,
    pub animation: AnimationFrame,
}

/// Drives a controller against a [`Stage`] with a fixed-step simulation
/// clock and a separate render clock.
pub struct Replay {
    controller: ReplayController,
    stage: SharedStage,
    script: InputScript,
    clock: ClockConfig,
    duration: f32,
    time: f32,
    accumulator: f32,
    frame: u32,
}

impl Replay {
    pub fn new(config: ReplayConfig) -> Result<Self, ReplayError> {
        config.validate()?;
        let ReplayConfig {
            duration_secs,
            clock,
            motion,
            stage,
            events,
        } = config;

        let stage: SharedStage = Rc::new(RefCell::new(Stage::new(stage)));
        let bindings = Bindings::new(
            StageProbe(Rc::clone(&stage)),
            StageBody(Rc::clone(&stage)),
            Some(ParamTable::default()),
            Some(SpriteFlip::default()),
        );
        let controller = MotionController::new(motion, bindings)?;

        Ok(Self {
            controller,
            stage,
            script: InputScript::new(events)?,
            clock,
            duration: duration_secs,
            time: 0.0,
            accumulator: 0.0,
            frame: 0,
        })
    }

    pub fn controller(&self) -> &ReplayController {
        &self.controller
    }

    pub fn stage(&self) -> std::cell::Ref<'_, Stage> {
        self.stage.borrow()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_done(&self) -> bool {
        self.time >= self.duration
    }

    fn apply(&mut self, event: ScriptEvent) {
        tracing::debug!(at = event.at, action = ?event.action, "input");
        match event.action {
            InputAction::Move { x, y } => self.controller.on_move_axis(Vec2::new(x, y)),
            InputAction::JumpPress => self.controller.on_jump_phase(true, false),
            InputAction::JumpRelease => self.controller.on_jump_phase(false, true),
            InputAction::Control { enabled } => self.controller.set_control_enabled(enabled),
        }
    }

    /// Advance one render frame: deliver due input, run the owed simulation
    /// ticks, then one visual tick.
    pub fn step_frame(&mut self) -> TraceFrame {
        let due: Vec<ScriptEvent> = self.script.due(self.time).to_vec();
        for event in due {
            self.apply(event);
        }

        let sim_dt = self.clock.sim_dt();
        self.accumulator += self.clock.frame_dt();
        let mut sim_steps = 0;
        while self.accumulator >= sim_dt && sim_steps < self.clock.max_substeps {
            self.controller.simulation_step(sim_dt);
            self.stage.borrow_mut().advance(sim_dt);
            self.accumulator -= sim_dt;
            sim_steps += 1;
        }
        if self.accumulator >= sim_dt {
            tracing::warn!(
                frame = self.frame,
                owed = self.accumulator / sim_dt,
                "simulation fell behind, dropping ticks"
            );
            self.accumulator %= sim_dt;
        }

        let edge = self.controller.visual_step();
        let bindings = self.controller.bindings();
        let jump = bindings
            .animator
            .as_ref()
            .and_then(|a| a.bools.get(&self.controller.config().animation.jump).copied())
            .unwrap_or(false);
        let flip_x = bindings.facing.is_some_and(|f| f.0);
        let position = self.stage.borrow().position;

        let trace = TraceFrame {
            frame: self.frame,
            time: self.time,
            sim_steps,
            position,
            velocity: self.controller.velocity(),
            facing: self.controller.facing(),
            flip_x,
            jump,
            edge,
            animation: self.controller.animation_frame(),
        };

        self.frame += 1;
        self.time = self.frame as f32 * self.clock.frame_dt();
        trace
    }

    /// Run to `duration_secs`, calling `on_frame` for every visual tick.
    pub fn run(&mut self, mut on_frame: impl FnMut(&TraceFrame)) -> u32 {
        let start = self.frame;
        while !self.is_done() {
            let trace = self.step_frame();
            on_frame(&trace);
        }
        if !self.script.finished() {
            tracing::warn!("replay ended before every scripted event was delivered");
        }
        self.frame - start
    }

    pub fn run_to_vec(&mut self) -> Vec<TraceFrame> {
        let mut frames = Vec::new();
        self.run(|f| frames.push(f.clone()));
        frames
    }
}
