use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::input::InputState;

/// Motion state of one controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// `y` carries over between ticks; `x` is rebuilt from input every tick.
    pub velocity: Vec2,
    /// Latest ground sample.
    pub is_grounded: bool,
    /// Grounded value as of the last visual tick. Only used for edges.
    pub was_grounded: bool,
}

/// Which gravity rule applied on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityBranch {
    /// Resting on ground while moving down: velocity pinned to the snap value.
    Snap,
    /// Airborne and rising after the jump button was released early.
    JumpCut,
    /// Everything else: normal gravity.
    Fall,
}

/// Outcome of one integrator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub velocity: Vec2,
    pub jumped: bool,
    pub gravity: GravityBranch,
}

/// Advance velocity by one simulation tick.
///
/// `state.is_grounded` must already hold this tick's ground sample. It is
/// read both for the jump trigger and the gravity branch; the branch sees the
/// post-jump `velocity.y`.
pub fn step_velocity(
    state: &mut MotionState,
    input: &mut InputState,
    config: &MotionConfig,
    dt: f32,
) -> StepOutcome {
    // Non-finite or negative dt would poison velocity permanently
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    state.velocity.x = input.move_axis * config.max_horizontal_speed;

    // Consumed whether or not it fires: airborne presses are dropped
    let jumped = input.consume_jump() && state.is_grounded;
    if jumped {
        state.velocity.y = config.jump_impulse;
    }

    let gravity = if state.is_grounded && state.velocity.y < 0.0 {
        state.velocity.y = config.grounded_snap_velocity_y;
        GravityBranch::Snap
    } else if !state.is_grounded && state.velocity.y > 0.0 && input.jump_released {
        state.velocity.y += config.gravity * config.jump_cut_gravity_scale * dt;
        GravityBranch::JumpCut
    } else {
        state.velocity.y += config.gravity * config.fall_gravity_scale * dt;
        GravityBranch::Fall
    };

    StepOutcome {
        velocity: state.velocity,
        jumped,
        gravity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> MotionConfig {
        MotionConfig {
            max_horizontal_speed: 10.0,
            jump_impulse: 10.0,
            gravity: -20.0,
            fall_gravity_scale: 1.0,
            jump_cut_gravity_scale: 5.0,
            ..Default::default()
        }
    }

    fn no_gravity() -> MotionConfig {
        MotionConfig {
            gravity: 0.0,
            ..scenario_config()
        }
    }

    #[test]
    fn horizontal_velocity_tracks_axis() {
        let mut state = MotionState {
            velocity: Vec2::new(99.0, 3.0),
            ..Default::default()
        };
        let mut input = InputState {
            move_axis: -0.5,
            ..Default::default()
        };
        let out = step_velocity(&mut state, &mut input, &no_gravity(), 0.1);
        assert_eq!(out.velocity, Vec2::new(-5.0, 3.0));
    }

    #[test]
    fn grounded_jump_scenario() {
        let cfg = scenario_config();
        let mut state = MotionState {
            is_grounded: true,
            was_grounded: true,
            ..Default::default()
        };
        let mut input = InputState {
            move_axis: 1.0,
            jump_requested: true,
            ..Default::default()
        };

        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);

        assert!(out.jumped);
        assert_eq!(out.gravity, GravityBranch::Fall);
        assert_eq!(out.velocity.x, 10.0);
        // Still grounded on the jump tick, so normal gravity applies: 10 - 20 * 0.1
        assert!((out.velocity.y - 8.0).abs() < 1e-5);
        assert!(!input.jump_requested);
    }

    #[test]
    fn airborne_jump_is_dropped() {
        let cfg = scenario_config();
        let mut state = MotionState::default();
        let mut input = InputState {
            jump_requested: true,
            ..Default::default()
        };

        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
        assert!(!out.jumped);
        assert!(!input.jump_requested, "press must be cleared, not queued");

        // Landing afterwards must not fire the stale press
        state.is_grounded = true;
        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
        assert!(!out.jumped);
        assert_eq!(out.velocity.y, cfg.grounded_snap_velocity_y);
    }

    #[test]
    fn grounded_fall_snaps() {
        let cfg = scenario_config();
        let mut state = MotionState {
            velocity: Vec2::new(0.0, -42.0),
            is_grounded: true,
            ..Default::default()
        };
        let mut input = InputState::default();

        for _ in 0..10 {
            let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
            assert_eq!(out.gravity, GravityBranch::Snap);
            assert_eq!(out.velocity.y, -1.0);
        }
    }

    #[test]
    fn grounded_at_rest_gets_normal_gravity_then_snaps() {
        let cfg = scenario_config();
        let mut state = MotionState {
            is_grounded: true,
            ..Default::default()
        };
        let mut input = InputState::default();

        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
        assert_eq!(out.gravity, GravityBranch::Fall);
        assert!((out.velocity.y + 2.0).abs() < 1e-5);

        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
        assert_eq!(out.gravity, GravityBranch::Snap);
        assert_eq!(out.velocity.y, -1.0);
    }

    #[test]
    fn released_jump_cuts_ascent() {
        let cfg = scenario_config();
        let start = MotionState {
            velocity: Vec2::new(0.0, 8.0),
            ..Default::default()
        };

        let mut held = start;
        let mut held_input = InputState::default();
        let held_out = step_velocity(&mut held, &mut held_input, &cfg, 0.1);

        let mut cut = start;
        let mut cut_input = InputState {
            jump_released: true,
            ..Default::default()
        };
        let cut_out = step_velocity(&mut cut, &mut cut_input, &cfg, 0.1);

        assert_eq!(held_out.gravity, GravityBranch::Fall);
        assert_eq!(cut_out.gravity, GravityBranch::JumpCut);
        assert!((held_out.velocity.y - 6.0).abs() < 1e-5);
        assert!((cut_out.velocity.y + 2.0).abs() < 1e-5);
        assert!(cut_out.velocity.y < held_out.velocity.y);
    }

    #[test]
    fn released_flag_ignored_while_falling() {
        let cfg = scenario_config();
        let mut state = MotionState {
            velocity: Vec2::new(0.0, -3.0),
            ..Default::default()
        };
        let mut input = InputState {
            jump_released: true,
            ..Default::default()
        };
        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
        assert_eq!(out.gravity, GravityBranch::Fall);
        assert!((out.velocity.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn released_flag_ignored_while_grounded_and_rising() {
        let cfg = scenario_config();
        let mut state = MotionState {
            velocity: Vec2::new(0.0, 8.0),
            is_grounded: true,
            ..Default::default()
        };
        let mut input = InputState {
            jump_released: true,
            ..Default::default()
        };
        let out = step_velocity(&mut state, &mut input, &cfg, 0.1);
        // Cut gravity needs the avatar airborne; on ground it is plain 1x gravity
        assert_eq!(out.gravity, GravityBranch::Fall);
        assert!((out.velocity.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn snapshot_resumes_identically_from_json() {
        let cfg = scenario_config();
        let mut state = MotionState {
            is_grounded: true,
            was_grounded: true,
            ..Default::default()
        };
        let mut input = InputState {
            move_axis: -0.5,
            jump_requested: true,
            ..Default::default()
        };
        step_velocity(&mut state, &mut input, &cfg, 0.02);
        state.is_grounded = false;
        input.jump_released = true;

        let saved = serde_json::to_string(&(state, input)).unwrap();
        let (mut restored_state, mut restored_input): (MotionState, InputState) =
            serde_json::from_str(&saved).unwrap();
        assert_eq!(restored_state, state);
        assert_eq!(restored_input, input);

        for _ in 0..10 {
            let live = step_velocity(&mut state, &mut input, &cfg, 0.02);
            let resumed = step_velocity(&mut restored_state, &mut restored_input, &cfg, 0.02);
            assert_eq!(live, resumed);
        }
    }

    #[test]
    fn bad_dt_is_treated_as_zero() {
        let cfg = scenario_config();
        for dt in [f32::NAN, f32::INFINITY, -0.5] {
            let mut state = MotionState {
                velocity: Vec2::new(0.0, 4.0),
                ..Default::default()
            };
            let mut input = InputState::default();
            let out = step_velocity(&mut state, &mut input, &cfg, dt);
            assert_eq!(out.velocity.y, 4.0, "dt={dt}");
        }
    }

    // ================================================================
    // Property-based tests (proptest)
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn horizontal_is_axis_times_speed(
                axis in -1.0f32..=1.0,
                vy in -50.0f32..50.0,
                speed in 0.1f32..100.0,
            ) {
                let cfg = MotionConfig {
                    max_horizontal_speed: speed,
                    ..no_gravity()
                };
                let mut state = MotionState {
                    velocity: Vec2::new(0.0, vy),
                    ..Default::default()
                };
                let mut input = InputState {
                    move_axis: axis,
                    ..Default::default()
                };
                let out = step_velocity(&mut state, &mut input, &cfg, 1.0 / 60.0);
                prop_assert_eq!(out.velocity.x, axis * speed);
                prop_assert_eq!(out.velocity.y, vy);
            }

            #[test]
            fn grounded_never_falls_faster_than_snap(
                vys in proptest::collection::vec(-100.0f32..0.0, 1..40),
                dt in 0.001f32..0.1,
            ) {
                let cfg = scenario_config();
                let mut input = InputState::default();
                for vy in vys {
                    let mut state = MotionState {
                        velocity: Vec2::new(0.0, vy),
                        is_grounded: true,
                        ..Default::default()
                    };
                    let out = step_velocity(&mut state, &mut input, &cfg, dt);
                    prop_assert_eq!(out.velocity.y, cfg.grounded_snap_velocity_y);
                }
            }

            #[test]
            fn jump_fires_only_when_grounded(
                grounded in any::<bool>(),
                requested in any::<bool>(),
            ) {
                let cfg = scenario_config();
                let mut state = MotionState {
                    is_grounded: grounded,
                    ..Default::default()
                };
                let mut input = InputState {
                    jump_requested: requested,
                    ..Default::default()
                };
                let out = step_velocity(&mut state, &mut input, &cfg, 0.02);
                prop_assert_eq!(out.jumped, grounded && requested);
                prop_assert!(!input.jump_requested);
            }

            #[test]
            fn cut_ascent_is_never_higher(
                vy in 0.1f32..30.0,
                dt in 0.001f32..0.1,
            ) {
                let cfg = scenario_config();
                let mut held = MotionState {
                    velocity: Vec2::new(0.0, vy),
                    ..Default::default()
                };
                let mut cut = held;
                step_velocity(&mut held, &mut InputState::default(), &cfg, dt);
                step_velocity(
                    &mut cut,
                    &mut InputState { jump_released: true, ..Default::default() },
                    &cfg,
                    dt,
                );
                prop_assert!(cut.velocity.y < held.velocity.y);
            }
        }
    }
}
