//! Angles are in degrees, `0` at the top of the ring and growing clockwise.

use serde::{Deserialize, Serialize};

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;

/// Raw scale endpoints as supplied by the user. Any integers are accepted,
/// wrap-around is resolved by [`AngleRange::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: i32,
    pub max: i32,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self { min: 0, max: 360 }
    }
}

impl AngleRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn normalize(&self) -> NormalizedAngleRange {
        normalize(self.min, self.max)
    }
}

/// Canonical scale range: `min` in `[-180, 180)` and `max - min` in `(0, 360]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAngleRange {
    pub min: f64,
    pub max: f64,
}

impl NormalizedAngleRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_full_circle(&self) -> bool {
        self.span() == FULL_TURN
    }
}

/// Folds `min` into `[-180, 180)` and `max` into `[180, 540)`, then pulls `max`
/// back by a turn when the span would otherwise exceed one.
pub fn normalize(raw_min: i32, raw_max: i32) -> NormalizedAngleRange {
    let mut min = raw_min.rem_euclid(360);
    if min >= 180 {
        min -= 360;
    }

    let mut max = raw_max.rem_euclid(360);
    if max < 180 {
        max += 360;
    }
    if max > min + 360 {
        max -= 360;
    }

    NormalizedAngleRange {
        min: f64::from(min),
        max: f64::from(max),
    }
}

/// Floored modulo into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(FULL_TURN)
}
