use std::ops::RangeInclusive;
use std::time::Duration;

pub const MAX_FIXED_UPDATES: u128 = 2;
pub const FIXED_UPDATE_INTERVAL_US: u128 = 20_000;
pub const EPSILON: f32 = 1e-5;

pub const DEATH_ACTION_DELAY: Duration = Duration::from_secs(1);
pub const ADVANCE_LEVEL_DELAY: Duration = Duration::from_secs(1);
pub const FIRST_DEATH_MESSAGE_DURATION: Duration = Duration::from_secs(3);

pub const RAGDOLL_GROUNDED_TORQUE: f32 = 50.0;
pub const RAGDOLL_AIRBORNE_TORQUE: RangeInclusive<f32> = 25.0..=200.0;

/// Tolerance, in degrees, either side of 90/180/270 for the entity to count as lying on a side.
pub const ROTATION_TOLERANCE_DEG: f32 = 2.0;

/// Persistent flag recording whether the player has ever died.
pub const HAS_DIED_KEY: &str = "has_died";
