use crate::angle::{FULL_TURN, HALF_TURN};
use crate::geometry::{CENTER, Point, point_on_ring};
use serde::Serialize;
use std::fmt::Write;

/// Spans closer than this to a full turn are drawn as a circle.
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// A single stroke on the 200×200 canvas, ready for a rendering sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPrimitive {
    FullCircle {
        center: Point,
        radius: f64,
    },
    Arc {
        start: Point,
        end: Point,
        radius: f64,
        sweep_clockwise: bool,
        is_large_arc: bool,
    },
}

impl DrawPrimitive {
    pub fn radius(&self) -> f64 {
        match self {
            Self::FullCircle { radius, .. } | Self::Arc { radius, .. } => *radius,
        }
    }

    pub fn is_full_circle(&self) -> bool {
        matches!(self, Self::FullCircle { .. })
    }

    /// SVG path data for this primitive. A full circle is emitted as two
    /// half-circle arcs since a single arc cannot start and end on the same point.
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        match *self {
            Self::FullCircle { center, radius } => {
                let top = Point::new(center.x, center.y - radius);
                let bottom = Point::new(center.x, center.y + radius);
                let _ = write!(
                    d,
                    "M {} {} A {r} {r} 0 0 1 {} {} A {r} {r} 0 0 1 {} {} Z",
                    fmt_coord(top.x),
                    fmt_coord(top.y),
                    fmt_coord(bottom.x),
                    fmt_coord(bottom.y),
                    fmt_coord(top.x),
                    fmt_coord(top.y),
                    r = fmt_coord(radius),
                );
            }
            Self::Arc {
                start,
                end,
                radius,
                sweep_clockwise,
                is_large_arc,
            } => {
                let _ = write!(
                    d,
                    "M {} {} A {r} {r} 0 {} {} {} {}",
                    fmt_coord(start.x),
                    fmt_coord(start.y),
                    u8::from(is_large_arc),
                    u8::from(sweep_clockwise),
                    fmt_coord(end.x),
                    fmt_coord(end.y),
                    r = fmt_coord(radius),
                );
            }
        }
        d
    }
}

fn fmt_coord(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    // avoid "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Builds the primitive for a clockwise stroke from `start_angle` to `end_angle`.
pub fn build_arc(start_angle: f64, end_angle: f64, radius: f64) -> DrawPrimitive {
    let sweep = end_angle - start_angle;

    if (sweep - FULL_TURN).abs() < FULL_CIRCLE_EPSILON {
        return DrawPrimitive::FullCircle {
            center: CENTER,
            radius,
        };
    }

    DrawPrimitive::Arc {
        start: point_on_ring(start_angle, radius),
        end: point_on_ring(end_angle, radius),
        radius,
        sweep_clockwise: true,
        is_large_arc: sweep > HALF_TURN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::normalize;

    #[test]
    fn test_full_span_is_circle() {
        let range = normalize(0, 360);
        let primitive = build_arc(range.min, range.max, 87.0);
        assert_eq!(
            primitive,
            DrawPrimitive::FullCircle {
                center: Point::new(100.0, 100.0),
                radius: 87.0
            }
        );
    }

    #[test]
    fn test_large_arc_flag() {
        for (start, end, large) in [
            (0.0, 90.0, false),
            (0.0, 180.0, false),
            (0.0, 180.5, true),
            (-150.0, 150.0, true),
            (-45.0, 45.0, false),
            (10.0, 350.0, true),
        ] {
            match build_arc(start, end, 50.0) {
                DrawPrimitive::Arc {
                    is_large_arc,
                    sweep_clockwise,
                    ..
                } => {
                    assert_eq!(is_large_arc, large, "{start}..{end}");
                    assert!(sweep_clockwise);
                }
                other => panic!("expected an arc, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_arc_endpoints() {
        let DrawPrimitive::Arc { start, end, .. } = build_arc(0.0, 90.0, 50.0) else {
            panic!("expected an arc");
        };
        assert!((start.x - 100.0).abs() < 1e-9 && (start.y - 50.0).abs() < 1e-9);
        assert!((end.x - 150.0).abs() < 1e-9 && (end.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_svg_path() {
        assert_eq!(
            build_arc(0.0, 90.0, 50.0).to_svg_path(),
            "M 100 50 A 50 50 0 0 1 150 100"
        );
        assert_eq!(
            build_arc(0.0, 360.0, 50.0).to_svg_path(),
            "M 100 50 A 50 50 0 0 1 100 150 A 50 50 0 0 1 100 50 Z"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(build_arc(0.0, 360.0, 10.0)).unwrap();
        assert_eq!(json["kind"], "full_circle");
        assert_eq!(json["radius"], 10.0);
    }
}
