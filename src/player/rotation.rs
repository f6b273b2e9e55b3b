use crate::core::config::ROTATION_TOLERANCE_DEG;

/// Which side the player is lying on, named by its rotation from upright.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum RotationBand {
    Quarter,
    Half,
    ThreeQuarter,
}

impl RotationBand {
    pub const ALL: [RotationBand; 3] = [
        RotationBand::Quarter,
        RotationBand::Half,
        RotationBand::ThreeQuarter,
    ];

    pub fn centre_degrees(self) -> f32 {
        match self {
            RotationBand::Quarter => 90.0,
            RotationBand::Half => 180.0,
            RotationBand::ThreeQuarter => 270.0,
        }
    }

    /// The band containing `angle` (degrees, any winding), if any. Band edges are inclusive.
    pub fn classify(angle: f32) -> Option<RotationBand> {
        let angle = angle.rem_euclid(360.0);
        Self::ALL
            .into_iter()
            .find(|band| (angle - band.centre_degrees()).abs() <= ROTATION_TOLERANCE_DEG)
    }
}

pub fn is_rotated(angle: f32) -> bool {
    RotationBand::classify(angle).is_some()
}
