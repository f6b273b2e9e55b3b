use crate::core::config::EPSILON;
use crate::util::gg_float;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

/// A 2D vector in physics-world units.
///
/// The controller works in the physics engine's convention: `x` grows to the right and `y` grows
/// upwards, so a jump is a positive `y` force.
///
/// # Equality
/// Two vectors are considered equal if their components differ by less than
/// [`EPSILON`](crate::core::config::EPSILON). Use [`Vec2::exactly_eq`] where bit-for-bit
/// comparison matters.
#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_finite() || other.is_finite() {
            (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
        } else {
            self.x == other.x && self.y == other.y
        }
    }
}

impl Vec2 {
    #[must_use]
    pub fn right() -> Vec2 {
        Vec2 { x: 1.0, y: 0.0 }
    }
    #[must_use]
    pub fn up() -> Vec2 {
        Vec2 { x: 0.0, y: 1.0 }
    }
    #[must_use]
    pub fn left() -> Vec2 {
        Vec2 { x: -1.0, y: 0.0 }
    }
    #[must_use]
    pub fn down() -> Vec2 {
        Vec2 { x: 0.0, y: -1.0 }
    }
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn with_x(self, x: f32) -> Vec2 {
        Vec2 { x, y: self.y }
    }
    #[must_use]
    pub fn with_y(self, y: f32) -> Vec2 {
        Vec2 { x: self.x, y }
    }

    /// Component-wise bit-for-bit equality, treating `-0.0` and `0.0` as equal.
    #[must_use]
    pub fn exactly_eq(&self, other: Vec2) -> bool {
        gg_float::force_positive_zero(self.x).to_bits()
            == gg_float::force_positive_zero(other.x).to_bits()
            && gg_float::force_positive_zero(self.y).to_bits()
                == gg_float::force_positive_zero(other.y).to_bits()
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2::zero()
    }

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}
impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        rhs * self
    }
}
impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_scalar_multiplication() {
        let a = Vec2 { x: 1.0, y: 1.0 };
        assert_eq!(a * 2.0, Vec2 { x: 2.0, y: 2.0 });
        assert_eq!(2.0 * a, Vec2 { x: 2.0, y: 2.0 });
    }

    #[test]
    fn vec2_add_sub() {
        let mut a = Vec2 { x: 1.0, y: 2.0 };
        a += Vec2 { x: 3.0, y: 4.0 };
        assert_eq!(a, Vec2 { x: 4.0, y: 6.0 });
        a -= Vec2 { x: 1.0, y: 1.0 };
        assert_eq!(a, Vec2 { x: 3.0, y: 5.0 });
        assert_eq!(-a, Vec2 { x: -3.0, y: -5.0 });
    }

    #[test]
    fn vec2_up_is_positive_y() {
        assert_eq!(Vec2::up() * 10.0, Vec2 { x: 0.0, y: 10.0 });
        assert_eq!(Vec2::down(), -Vec2::up());
        assert_eq!(Vec2::left(), -Vec2::right());
    }

    #[test]
    fn vec2_equality_is_approximate_but_exactly_eq_is_not() {
        let a = Vec2 { x: 1.0, y: 0.0 };
        let b = Vec2 { x: 1.0 + EPSILON / 10.0, y: 0.0 };
        assert_eq!(a, b);
        assert!(!a.exactly_eq(b));
        assert!(Vec2 { x: -0.0, y: 0.0 }.exactly_eq(Vec2::zero()));
    }
}
