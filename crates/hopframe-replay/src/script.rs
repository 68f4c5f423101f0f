use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// One scripted input callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputAction {
    Move { x: f32, y: f32 },
    JumpPress,
    JumpRelease,
    Control { enabled: bool },
}

/// An input callback delivered at `at` seconds into the replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub at: f32,
    #[serde(flatten)]
    pub action: InputAction,
}

/// Time-ordered input timeline.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
    cursor: usize,
}

impl InputScript {
    /// Sort by time. Events sharing a timestamp keep their file order.
    pub fn new(mut events: Vec<ScriptEvent>) -> Result<Self, ReplayError> {
        if let Some(bad) = events.iter().find(|e| !e.at.is_finite() || e.at < 0.0) {
            return Err(ReplayError::InvalidScript(format!(
                "event time {} must be finite and >= 0",
                bad.at
            )));
        }
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { events, cursor: 0 })
    }

    /// Events due at or before `now` that haven't been returned yet.
    pub fn due(&mut self, now: f32) -> &[ScriptEvent] {
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].at <= now {
            self.cursor += 1;
        }
        &self.events[start..self.cursor]
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.events.len()
    }
}
