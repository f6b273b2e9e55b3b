//! A 2D platformer character controller.
//!
//! [`PlayerController`](player::PlayerController) owns the movement and "feeling" state of a
//! single player entity. A host simulation loop drives it once per rendered frame with
//! [`on_frame`](player::PlayerController::on_frame) and once per fixed physics step with
//! [`on_fixed_step`](player::PlayerController::on_fixed_step), handing it an
//! [`UpdateContext`](core::update::UpdateContext) that borrows the host's physics body, input,
//! level and renderer for the duration of the tick.

pub mod core;
pub mod player;
pub mod util;
