use serde::{Deserialize, Serialize};

use crate::core::prelude::*;
use crate::player::rotation::RotationBand;

/// Corrective torque applied when the player jumps while lying on a side, one per side.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StuckTorques {
    pub quarter: f32,
    pub half: f32,
    pub three_quarter: f32,
}

impl Default for StuckTorques {
    fn default() -> Self {
        Self {
            quarter: -80.0,
            half: 150.0,
            three_quarter: 80.0,
        }
    }
}

impl StuckTorques {
    pub fn for_band(&self, band: RotationBand) -> f32 {
        match band {
            RotationBand::Quarter => self.quarter,
            RotationBand::Half => self.half,
            RotationBand::ThreeQuarter => self.three_quarter,
        }
    }
}

/// Tuning for one player entity. Fixed for the lifetime of a controller.
///
/// Speeds and accelerations are per fixed step, not per second: `acceleration` is added to the
/// horizontal speed once per [`on_fixed_step`](crate::player::PlayerController::on_fixed_step).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
    /// Force of the one-shot upward push on the first jumping step.
    pub jump_force: f32,
    pub jump_hold_acceleration: f32,
    /// Seconds.
    pub max_jump_hold_time: f32,
    pub stuck_torques: StuckTorques,
    /// End of the grounded linecast, relative to the entity origin.
    pub ground_check_offset: Vec2,
    pub next_level: String,
    pub first_death_message: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.6,
            deceleration: 0.2,
            max_speed: 5.0,
            jump_force: 350.0,
            jump_hold_acceleration: 0.15,
            max_jump_hold_time: 0.25,
            stuck_torques: StuckTorques::default(),
            ground_check_offset: Vec2 { x: 0.0, y: -0.55 },
            next_level: "next".to_string(),
            first_death_message: "Oops! Dying restarts the level. Press jump to try again."
                .to_string(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("max_speed", self.max_speed),
            ("jump_force", self.jump_force),
            ("jump_hold_acceleration", self.jump_hold_acceleration),
            ("max_jump_hold_time", self.max_jump_hold_time),
            ("stuck_torques.quarter", self.stuck_torques.quarter),
            ("stuck_torques.half", self.stuck_torques.half),
            ("stuck_torques.three_quarter", self.stuck_torques.three_quarter),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            bail!("{name} must be finite, got {value}");
        }
        if !self.ground_check_offset.is_finite() {
            bail!("ground_check_offset must be finite, got {}", self.ground_check_offset);
        }
        if self.max_speed <= 0.0 {
            bail!("max_speed must be positive, got {}", self.max_speed);
        }
        for (name, value) in [
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("max_jump_hold_time", self.max_jump_hold_time),
        ] {
            if value < 0.0 {
                bail!("{name} must not be negative, got {value}");
            }
        }
        if self.next_level.trim().is_empty() {
            bail!("next_level must name a level");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ControllerConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            ControllerConfig { max_speed: 0.0, ..Default::default() },
            ControllerConfig { deceleration: -1.0, ..Default::default() },
            ControllerConfig { jump_force: f32::NAN, ..Default::default() },
            ControllerConfig { next_level: "  ".to_string(), ..Default::default() },
            ControllerConfig {
                ground_check_offset: Vec2 { x: 0.0, y: f32::INFINITY },
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn torque_lookup_by_band() {
        let torques = StuckTorques { quarter: 1.0, half: 2.0, three_quarter: 3.0 };
        assert_eq!(torques.for_band(RotationBand::Quarter), 1.0);
        assert_eq!(torques.for_band(RotationBand::Half), 2.0);
        assert_eq!(torques.for_band(RotationBand::ThreeQuarter), 3.0);
    }

    #[test]
    fn config_round_trips_through_bincode() -> Result<()> {
        let config = ControllerConfig { max_speed: 7.5, ..Default::default() };
        let bytes = bincode::serialize(&config)?;
        let decoded: ControllerConfig = bincode::deserialize(&bytes)?;
        assert_eq!(decoded, config);
        Ok(())
    }
}
