use crate::core::prelude::*;

/// Player input, as seen by the controller during a single tick.
pub trait InputSource {
    /// Continuous horizontal axis in `[-1, 1]`.
    fn horizontal_axis(&self) -> f32;
    /// The jump button went down since the previous frame.
    fn jump_pressed(&self) -> bool;
    /// The jump button is currently down, including the frame it was pressed.
    fn jump_held(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputState {
    Pressed,
    Held,
    Released,
}

/// Folds raw button events into per-frame states.
///
/// Events are queued as they arrive from the windowing layer and applied by
/// [`update_step`](InputHandler::update_step), which the host calls once at the start of every
/// rendered frame.
#[derive(Clone, Debug, Default)]
pub struct InputHandler {
    jump: Option<InputState>,
    queued_jump_events: Vec<bool>,
    horizontal_axis: f32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_jump_event(&mut self, down: bool) {
        self.queued_jump_events.push(down);
    }

    pub fn set_horizontal_axis(&mut self, axis: f32) {
        if !(-1.0..=1.0).contains(&axis) {
            warn_every_seconds!(1, "horizontal axis out of range: {axis}, clamping");
        }
        self.horizontal_axis = if axis.is_nan() { 0.0 } else { axis.clamp(-1.0, 1.0) };
    }

    pub fn update_step(&mut self) {
        self.jump = match self.jump {
            Some(InputState::Pressed | InputState::Held) => Some(InputState::Held),
            Some(InputState::Released) | None => None,
        };
        for down in self.queued_jump_events.drain(..) {
            self.jump = match (self.jump, down) {
                (None | Some(InputState::Released), true) => Some(InputState::Pressed),
                (Some(InputState::Pressed | InputState::Held), false) => Some(InputState::Released),
                (state, _) => state,
            };
        }
    }

    pub fn jump_released(&self) -> bool {
        self.jump == Some(InputState::Released)
    }
}

impl InputSource for InputHandler {
    fn horizontal_axis(&self) -> f32 {
        self.horizontal_axis
    }
    fn jump_pressed(&self) -> bool {
        self.jump == Some(InputState::Pressed)
    }
    fn jump_held(&self) -> bool {
        matches!(self.jump, Some(InputState::Pressed | InputState::Held))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_hold_then_release() {
        let mut input = InputHandler::new();
        input.queue_jump_event(true);
        input.update_step();
        assert!(input.jump_pressed());
        assert!(input.jump_held());

        input.update_step();
        assert!(!input.jump_pressed());
        assert!(input.jump_held());

        input.queue_jump_event(false);
        input.update_step();
        assert!(input.jump_released());
        assert!(!input.jump_held());

        input.update_step();
        assert!(!input.jump_released());
        assert!(!input.jump_held());
    }

    #[test]
    fn tap_within_one_frame_is_released_but_not_pressed() {
        let mut input = InputHandler::new();
        input.queue_jump_event(true);
        input.queue_jump_event(false);
        input.update_step();
        assert!(!input.jump_pressed());
        assert!(input.jump_released());
    }

    #[test]
    fn axis_is_clamped() {
        let mut input = InputHandler::new();
        input.set_horizontal_axis(3.0);
        assert_eq!(input.horizontal_axis(), 1.0);
        input.set_horizontal_axis(-0.5);
        assert_eq!(input.horizontal_axis(), -0.5);
        input.set_horizontal_axis(f32::NAN);
        assert_eq!(input.horizontal_axis(), 0.0);
    }
}
