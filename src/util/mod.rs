pub mod assert;
pub mod linalg;
pub mod log;
pub mod prefs;

pub mod gg_float {
    use crate::core::config::EPSILON;
    use num_traits::Zero;
    use std::time::Duration;

    pub fn force_positive_zero(x: f32) -> f32 {
        if x.is_zero() { 0.0 } else { x }
    }

    pub fn sign_zero(x: f32) -> f32 {
        if x.is_zero() { 0.0 } else { x.signum() }
    }

    pub fn is_near_zero(x: f32) -> bool {
        x.abs() < EPSILON
    }

    pub fn secs(duration: Duration) -> f32 {
        duration.as_secs_f32()
    }

    /// Moves `x` towards zero by `amount`, stopping at zero rather than crossing it.
    pub fn approach_zero(x: f32, amount: f32) -> f32 {
        if x > 0.0 {
            (x - amount).max(0.0)
        } else if x < 0.0 {
            (x + amount).min(0.0)
        } else {
            x
        }
    }

}
