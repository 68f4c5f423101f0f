//! Kinematic stand-in for the physics body.
//!
//! Flat ground segments only: no walls, ceilings or slopes. Enough to feed
//! the controller a real ground signal and watch the avatar move.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use hopframe_core::{GroundMask, GroundProbe, VelocitySink};

/// How far below a floor top the feet may start a step and still land on it.
const SNAP_TOLERANCE: f32 = 0.25;

/// Horizontal ground segment with its top surface at `top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub min_x: f32,
    pub max_x: f32,
    pub top: f32,
    #[serde(default)]
    pub layer: u32,
}

impl Floor {
    fn spans(&self, x: f32, margin: f32) -> bool {
        x >= self.min_x - margin && x <= self.max_x + margin
    }
}

/// Stage layout, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub floors: Vec<Floor>,
    pub spawn: [f32; 2],
    /// Radius of the foot sensor circle centred on the avatar's feet.
    pub foot_radius: f32,
    /// Feet below this height respawn at `spawn`.
    pub kill_y: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            floors: vec![Floor {
                min_x: -50.0,
                max_x: 50.0,
                top: 0.0,
                layer: 0,
            }],
            spawn: [0.0, 0.0],
            foot_radius: 0.1,
            kill_y: -20.0,
        }
    }
}

/// Avatar feet position plus the last velocity the controller asked for.
#[derive(Debug, Clone)]
pub struct Stage {
    config: StageConfig,
    pub position: Vec2,
    pub velocity: Vec2,
    pub respawns: u32,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let position = Vec2::from(config.spawn);
        Self {
            config,
            position,
            velocity: Vec2::ZERO,
            respawns: 0,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Foot sensor overlap against floors on a layer in `mask`.
    pub fn feet_touching(&self, mask: GroundMask) -> bool {
        let r = self.config.foot_radius;
        self.config.floors.iter().any(|floor| {
            mask.contains_layer(floor.layer)
                && floor.spans(self.position.x, r)
                && (self.position.y - floor.top).abs() <= r
        })
    }

    /// Integrate position with the current velocity and settle on floors.
    pub fn advance(&mut self, dt: f32) {
        let prev_y = self.position.y;
        self.position += self.velocity * dt;

        if self.velocity.y <= 0.0 {
            let (x, y) = (self.position.x, self.position.y);
            // Highest floor whose top the feet crossed (or sank below) this step
            let landing = self
                .config
                .floors
                .iter()
                .filter(|f| f.spans(x, 0.0) && prev_y >= f.top - SNAP_TOLERANCE && y <= f.top)
                .map(|f| f.top)
                .reduce(f32::max);
            if let Some(top) = landing {
                self.position.y = top;
            }
        }

        if self.position.y < self.config.kill_y {
            tracing::info!(x = self.position.x, y = self.position.y, "fell off stage, respawning");
            self.respawn();
        }
    }

    pub fn respawn(&mut self) {
        self.position = Vec2::from(self.config.spawn);
        self.velocity = Vec2::ZERO;
        self.respawns += 1;
    }
}

/// Shared handle so the ground probe and the velocity sink see one body.
pub type SharedStage = Rc<RefCell<Stage>>;

/// Ground probe half of a [`SharedStage`].
pub struct StageProbe(pub SharedStage);

impl GroundProbe for StageProbe {
    fn is_touching(&self, mask: GroundMask) -> bool {
        self.0.borrow().feet_touching(mask)
    }
}

/// Velocity sink half of a [`SharedStage`].
pub struct StageBody(pub SharedStage);

impl VelocitySink for StageBody {
    fn set_velocity(&mut self, velocity: Vec2) {
        self.0.borrow_mut().velocity = velocity;
    }
}
