use crate::util::linalg::Vec2;

/// Which visual the player entity should show.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum CosmeticState {
    #[default]
    Normal,
    Dead,
    Cool,
    Horrified,
}

impl CosmeticState {
    pub fn key(self) -> &'static str {
        match self {
            CosmeticState::Normal => "normal",
            CosmeticState::Dead => "dead",
            CosmeticState::Cool => "cool",
            CosmeticState::Horrified => "horrified",
        }
    }

    /// Inverse of [`key`](CosmeticState::key). Unknown keys fall back to `Normal`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "dead" => CosmeticState::Dead,
            "cool" => CosmeticState::Cool,
            "horrified" => CosmeticState::Horrified,
            _ => CosmeticState::Normal,
        }
    }
}

/// A line of text drawn over the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub alpha: f32,
    /// Offset from the overlay's resting position, in world units.
    pub offset: Vec2,
}

impl TextOverlay {
    const FADE_IN: f32 = 0.1;
    const FADE_OUT: f32 = 0.3;
    const RISE: f32 = 0.5;

    /// The overlay at fraction `t` of its display time. `t` is clamped to `[0, 1]`.
    pub fn at_fraction(text: impl Into<String>, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let alpha = if t < Self::FADE_IN {
            t / Self::FADE_IN
        } else if t > 1.0 - Self::FADE_OUT {
            (1.0 - t) / Self::FADE_OUT
        } else {
            1.0
        };
        Self {
            text: text.into(),
            alpha,
            offset: Vec2::up() * (t * Self::RISE),
        }
    }
}

/// Receives the player's visual state.
pub trait Renderer {
    fn show_cosmetic(&mut self, state: CosmeticState);
    fn show_overlay(&mut self, overlay: &TextOverlay);
    fn hide_overlay(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_and_unknown_is_normal() {
        for state in [
            CosmeticState::Normal,
            CosmeticState::Dead,
            CosmeticState::Cool,
            CosmeticState::Horrified,
        ] {
            assert_eq!(CosmeticState::from_key(state.key()), state);
        }
        assert_eq!(CosmeticState::from_key("sparkly"), CosmeticState::Normal);
    }

    #[test]
    fn overlay_fades_in_holds_and_fades_out() {
        assert_eq!(TextOverlay::at_fraction("hi", 0.0).alpha, 0.0);
        assert!((TextOverlay::at_fraction("hi", 0.05).alpha - 0.5).abs() < 1e-4);
        assert_eq!(TextOverlay::at_fraction("hi", 0.5).alpha, 1.0);
        assert!(TextOverlay::at_fraction("hi", 1.0).alpha.abs() < 1e-4);
        assert!(TextOverlay::at_fraction("hi", 2.0).alpha.abs() < 1e-4);
    }

    #[test]
    fn overlay_rises_with_time() {
        let start = TextOverlay::at_fraction("hi", 0.0);
        let end = TextOverlay::at_fraction("hi", 1.0);
        assert_eq!(start.offset, Vec2::zero());
        assert_eq!(end.offset, Vec2 { x: 0.0, y: 0.5 });
    }
}
