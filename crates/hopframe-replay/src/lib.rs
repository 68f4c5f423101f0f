pub mod config;
pub mod error;
pub mod runner;
pub mod script;
pub mod stage;

pub use config::{ClockConfig, ReplayConfig};
pub use error::ReplayError;
pub use runner::{ParamTable, Replay, SpriteFlip, TraceFrame};
pub use script::{InputAction, InputScript, ScriptEvent};
pub use stage::{Floor, Stage, StageConfig};
