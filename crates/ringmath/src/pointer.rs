use crate::angle::{FULL_TURN, NormalizedAngleRange, wrap_degrees};
use crate::geometry::Point;
use crate::value::{self, MAXIMUM, MINIMUM};
use thiserror::Error;

/// Absorbs the rounding of `atan2` for points placed exactly on a scale end.
const ANGLE_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("Pointer at {angle:.1}° lies outside the scale (value {value:.1})")]
pub struct OutOfRange {
    pub angle: f64,
    pub value: f64,
}

/// Center of a control laid out at `width` × `height` pixels.
pub fn center_of(width: f64, height: f64) -> Point {
    Point::new(width / 2.0, height / 2.0)
}

/// Angle of `pointer` around `center`, clockwise from the top, in `(-180, 180]`.
/// Screen coordinates grow downward, hence the flipped vertical axis.
pub fn pointer_angle(pointer: Point, center: Point) -> f64 {
    let dx = pointer.x - center.x;
    let dy = center.y - pointer.y;
    dx.atan2(dy).to_degrees()
}

/// Turns a pointer position into a value. Positions outside the angular sector
/// of the scale are rejected rather than clamped.
pub fn resolve(
    pointer: Point,
    center: Point,
    range: &NormalizedAngleRange,
) -> Result<f64, OutOfRange> {
    let angle = pointer_angle(pointer, center);

    let mut span = wrap_degrees(range.span());
    if span == 0.0 {
        span = FULL_TURN;
    }

    let mut offset = wrap_degrees(angle - range.min);
    if FULL_TURN - offset < ANGLE_TOLERANCE {
        offset = 0.0;
    }

    let sector = NormalizedAngleRange {
        min: range.min,
        max: range.min + span,
    };
    let value = value::angle_to_value(range.min + offset, &sector);
    if value > MAXIMUM + ANGLE_TOLERANCE {
        return Err(OutOfRange { angle, value });
    }

    Ok(value.clamp(MINIMUM, MAXIMUM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::normalize;
    use crate::geometry::{CENTER, point_on_ring};
    use crate::value::{OffScalePolicy, value_to_angle};

    #[test]
    fn test_top_of_full_circle_is_zero() {
        let range = normalize(0, 360);
        let value = resolve(Point::new(100.0, 0.0), CENTER, &range).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_pointer_angle_convention() {
        let cases = [
            (Point::new(0.0, -10.0), 0.0),
            (Point::new(10.0, 0.0), 90.0),
            (Point::new(0.0, 10.0), 180.0),
            (Point::new(-10.0, 0.0), -90.0),
        ];
        for (pointer, expected) in cases {
            let angle = pointer_angle(pointer, Point::default());
            assert!((angle - expected).abs() < 1e-9, "{pointer:?}: {angle}");
        }
    }

    #[test]
    fn test_resolve_inverts_value_to_angle() {
        for (raw_min, raw_max) in [(-150, 150), (0, 270), (315, 45), (90, 400)] {
            let range = normalize(raw_min, raw_max);
            for value in (0..=100).step_by(5).map(f64::from) {
                let angle = value_to_angle(value, &range, OffScalePolicy::Clamp);
                let point = point_on_ring(angle, 80.0);
                let resolved = resolve(point, CENTER, &range).unwrap();
                assert!(
                    (resolved - value).abs() < 1e-6,
                    "{value} resolved to {resolved} on {range:?}"
                );
            }
        }
    }

    #[test]
    fn test_resolve_rejects_dead_zone() {
        let range = normalize(-150, 150);
        // straight down is outside a -150..150 scale
        let err = resolve(Point::new(100.0, 180.0), CENTER, &range).unwrap_err();
        assert!(err.value > 100.0);
    }

    #[test]
    fn test_resolve_uses_pixel_center() {
        let range = normalize(-150, 150);
        let center = center_of(400.0, 300.0);
        // directly right of center is 90°, i.e. 80% of a 300° scale starting at -150°
        let value = resolve(Point::new(390.0, 150.0), center, &range).unwrap();
        assert!((value - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_rejects_outside_wrapped_scale() {
        let range = normalize(315, 45);
        for angle in [46.0, 180.0, 314.0] {
            let point = point_on_ring(angle, 80.0);
            assert!(
                resolve(point, CENTER, &range).is_err(),
                "{angle}° should be outside {range:?}"
            );
        }

        let inside = resolve(point_on_ring(0.0, 80.0), CENTER, &range).unwrap();
        assert!((inside - 50.0).abs() < 1e-9);
    }
}
