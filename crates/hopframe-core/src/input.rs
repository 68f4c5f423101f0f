use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Latched player input, written by input callbacks and read once per
/// simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Horizontal axis in [-1, 1]: the x component of the normalized stick.
    pub move_axis: f32,
    /// Pending jump press. Consumed by the next simulation tick.
    pub jump_requested: bool,
    /// A release edge was seen since the last landing.
    pub jump_released: bool,
}

impl InputState {
    /// Store the latest movement vector. Last write wins.
    ///
    /// With control disabled the axis is forced to zero instead of ignored.
    pub fn set_move_axis(&mut self, input: Vec2, control_enabled: bool) {
        self.move_axis = if control_enabled {
            // normalize_or_zero also maps NaN/Inf input to zero
            input.normalize_or_zero().x
        } else {
            0.0
        };
    }

    /// Latch a jump press (`true`) or release (`false`) edge.
    pub fn on_jump_edge(&mut self, pressed: bool, control_enabled: bool) {
        if !control_enabled {
            return;
        }
        if pressed {
            self.jump_requested = true;
            self.jump_released = false;
        } else {
            // A release cancels a press the simulation hasn't applied yet
            self.jump_released = true;
            self.jump_requested = false;
        }
    }

    /// Take the pending jump request, clearing it.
    pub fn consume_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_is_normalized_x() {
        let mut input = InputState::default();
        input.set_move_axis(Vec2::new(1.0, 1.0), true);
        assert!((input.move_axis - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);

        input.set_move_axis(Vec2::new(-0.3, 0.0), true);
        assert_eq!(input.move_axis, -1.0);
    }

    #[test]
    fn zero_and_nan_axis_become_zero() {
        let mut input = InputState {
            move_axis: 1.0,
            ..Default::default()
        };
        input.set_move_axis(Vec2::ZERO, true);
        assert_eq!(input.move_axis, 0.0);

        input.set_move_axis(Vec2::new(f32::NAN, 0.0), true);
        assert_eq!(input.move_axis, 0.0);
    }

    #[test]
    fn disabled_control_zeroes_axis() {
        let mut input = InputState::default();
        input.set_move_axis(Vec2::X, true);
        input.set_move_axis(Vec2::X, false);
        assert_eq!(input.move_axis, 0.0);
    }

    #[test]
    fn press_then_release_cancels_request() {
        let mut input = InputState::default();
        input.on_jump_edge(true, true);
        assert!(input.jump_requested);
        assert!(!input.jump_released);

        input.on_jump_edge(false, true);
        assert!(!input.jump_requested);
        assert!(input.jump_released);
    }

    #[test]
    fn press_clears_released_flag() {
        let mut input = InputState {
            jump_released: true,
            ..Default::default()
        };
        input.on_jump_edge(true, true);
        assert!(!input.jump_released);
    }

    #[test]
    fn edges_ignored_while_disabled() {
        let mut input = InputState::default();
        input.on_jump_edge(true, false);
        assert_eq!(input, InputState::default());

        let mut held = InputState {
            jump_requested: true,
            ..Default::default()
        };
        held.on_jump_edge(false, false);
        assert!(held.jump_requested);
        assert!(!held.jump_released);
    }

    #[test]
    fn consume_jump_clears() {
        let mut input = InputState::default();
        input.on_jump_edge(true, true);
        assert!(input.consume_jump());
        assert!(!input.consume_jump());
    }
}
