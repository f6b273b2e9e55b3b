//! Per-step speed rules, kept free of any physics or input access.

use crate::core::prelude::*;
use crate::player::config::ControllerConfig;

/// The horizontal speed after one fixed step.
///
/// Holding a direction pushes the speed by `acceleration + deceleration`, capped at `max_speed`.
/// Deceleration is then always applied towards zero, so a held direction settles at
/// `max_speed - deceleration` and a released one decays to exactly zero.
pub fn horizontal_speed(speed: f32, axis: f32, config: &ControllerConfig) -> f32 {
    let push = config.acceleration + config.deceleration;
    let speed = if gg_float::is_near_zero(axis) {
        speed
    } else if axis > 0.0 {
        (speed + push).min(config.max_speed)
    } else {
        (speed - push).max(-config.max_speed)
    };
    gg_float::approach_zero(speed, config.deceleration)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JumpStep {
    /// First jumping step: apply the jump force and nothing else.
    Launch,
    /// Still rising under the held button.
    Rise { speed_y: f32, hold_time: f32 },
    /// The jump is over; gravity takes it from here.
    Release { speed_y: f32 },
}

/// The vertical outcome of one fixed step spent in the jumping state.
pub fn jump_step(
    first_step: bool,
    held: bool,
    speed_y: f32,
    hold_time: f32,
    delta_secs: f32,
    config: &ControllerConfig,
) -> JumpStep {
    if first_step {
        return JumpStep::Launch;
    }
    if !held {
        return JumpStep::Release { speed_y };
    }
    let speed_y = speed_y + config.jump_hold_acceleration;
    let hold_time = hold_time + delta_secs;
    if hold_time >= config.max_jump_hold_time {
        JumpStep::Release { speed_y }
    } else {
        JumpStep::Rise { speed_y, hold_time }
    }
}
