use crate::util::linalg::Vec2;
use std::ops::BitOr;

/// A set of collision layers, one bit per layer.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND_LAYER: u32 = 8;
    pub const GROUND: LayerMask = LayerMask::from_layer(Self::GROUND_LAYER);

    pub const fn from_layer(layer: u32) -> Self {
        LayerMask(1 << layer)
    }

    pub fn contains_layer(self, layer: u32) -> bool {
        layer < u32::BITS && self.0 & (1 << layer) != 0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}

/// The rigid body of the player entity, and the world it collides with.
///
/// Implementations wrap whatever physics engine the host uses. The controller never integrates
/// motion itself; it only queries and nudges the body.
pub trait PhysicsWorld {
    /// Whether the segment `from`..`to` intersects any geometry on a layer in `mask`.
    fn linecast(&self, from: Vec2, to: Vec2, mask: LayerMask) -> bool;

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// Accumulates a force to be applied at the next integration step. A later
    /// [`set_velocity`](PhysicsWorld::set_velocity) in the same step does not discard it.
    fn add_force(&mut self, force: Vec2);
    /// Positive torque rotates counter-clockwise.
    fn add_torque(&mut self, torque: f32);

    fn position(&self) -> Vec2;
    /// Rotation about the facing axis, in degrees.
    fn rotation_z(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_mask_matches_only_ground_layer() {
        assert!(LayerMask::GROUND.contains_layer(LayerMask::GROUND_LAYER));
        assert!(!LayerMask::GROUND.contains_layer(0));
        assert!(!LayerMask::NONE.contains_layer(LayerMask::GROUND_LAYER));
        assert!(!LayerMask::GROUND.contains_layer(40));
    }

    #[test]
    fn masks_combine() {
        let mask = LayerMask::GROUND | LayerMask::from_layer(2);
        assert!(mask.contains_layer(2));
        assert!(mask.contains_layer(LayerMask::GROUND_LAYER));
    }
}
