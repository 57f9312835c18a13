use crate::angle::NormalizedAngleRange;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

pub const MINIMUM: f64 = 0.0;
pub const MAXIMUM: f64 = 100.0;

/// How far past the scale ends [`OffScalePolicy::Extrapolate`] places an off-scale value.
pub const OFF_SCALE_OFFSET: f64 = 7.5;

/// Where the angle of a value outside `[0, 100]` ends up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OffScalePolicy {
    /// Pin the angle to the nearest scale end.
    #[default]
    Clamp,
    /// Legacy behavior: push the angle [`OFF_SCALE_OFFSET`] degrees past the
    /// scale end. The trail is still capped at `max` when drawn, but a value
    /// below the minimum moves the needle angle before the scale start.
    Extrapolate,
}

pub fn is_off_scale(value: f64) -> bool {
    !(MINIMUM..=MAXIMUM).contains(&value)
}

pub fn value_to_angle(value: f64, range: &NormalizedAngleRange, policy: OffScalePolicy) -> f64 {
    if value < MINIMUM {
        return match policy {
            OffScalePolicy::Clamp => range.min,
            OffScalePolicy::Extrapolate => range.min - OFF_SCALE_OFFSET,
        };
    }

    if value > MAXIMUM {
        return match policy {
            OffScalePolicy::Clamp => range.max,
            OffScalePolicy::Extrapolate => range.max + OFF_SCALE_OFFSET,
        };
    }

    range.min + (value - MINIMUM) / (MAXIMUM - MINIMUM) * range.span()
}

/// Inverse of the in-range part of [`value_to_angle`]. `angle` is expected to
/// lie in `[range.min, range.max]`; nothing is wrapped or clamped. Pointer
/// resolution goes through this after unwrapping the pointer angle.
pub fn angle_to_value(angle: f64, range: &NormalizedAngleRange) -> f64 {
    MINIMUM + (MAXIMUM - MINIMUM) * (angle - range.min) / range.span()
}

/// Rounds half up to the nearest multiple of `step`. A `step` of zero or less
/// leaves the value untouched.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }

    let remainder = value.rem_euclid(step);
    if step - remainder <= remainder {
        value + (step - remainder)
    } else {
        value - remainder
    }
}
