use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All geometry is computed on a logical square canvas of this size.
pub const CANVAS_SIZE: f64 = 200.0;
pub const CENTER: Point = Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);
pub const OUTER_RADIUS: f64 = CANVAS_SIZE / 2.0;

pub const DEFAULT_SCALE_WIDTH: f64 = 26.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point at `angle` degrees (clockwise from the top) and `radius` from [`CENTER`].
pub fn point_on_ring(angle: f64, radius: f64) -> Point {
    let radians = angle.to_radians();
    Point::new(
        CENTER.x + radius * radians.sin(),
        CENTER.y - radius * radians.cos(),
    )
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Scale width must not be negative (got {0})")]
    NegativeScaleWidth(f64),
    #[error("Scale width {scale_width} with padding {padding} leaves no room for the ring")]
    NonPositiveRadius { scale_width: f64, padding: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusParameters {
    pub scale_width: f64,
    #[serde(default)]
    pub padding: f64,
}

impl Default for RadiusParameters {
    fn default() -> Self {
        Self {
            scale_width: DEFAULT_SCALE_WIDTH,
            padding: 0.0,
        }
    }
}

impl RadiusParameters {
    pub fn new(scale_width: f64, padding: f64) -> Self {
        Self {
            scale_width,
            padding,
        }
    }

    /// Radius of the center line of the scale stroke.
    pub fn middle_radius(&self) -> f64 {
        OUTER_RADIUS - self.padding - self.scale_width / 2.0
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.scale_width < 0.0 {
            return Err(GeometryError::NegativeScaleWidth(self.scale_width));
        }
        if self.middle_radius() <= 0.0 {
            return Err(GeometryError::NonPositiveRadius {
                scale_width: self.scale_width,
                padding: self.padding,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).hypot(a.y - b.y) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_point_on_ring_cardinal_directions() {
        assert_close(point_on_ring(0.0, 50.0), Point::new(100.0, 50.0));
        assert_close(point_on_ring(90.0, 50.0), Point::new(150.0, 100.0));
        assert_close(point_on_ring(180.0, 50.0), Point::new(100.0, 150.0));
        assert_close(point_on_ring(-90.0, 50.0), Point::new(50.0, 100.0));
    }

    #[test]
    fn test_middle_radius() {
        assert_eq!(RadiusParameters::default().middle_radius(), 87.0);
        assert_eq!(RadiusParameters::new(20.0, 5.0).middle_radius(), 85.0);
    }

    #[test]
    fn test_validate() {
        assert!(RadiusParameters::default().validate().is_ok());
        assert_eq!(
            RadiusParameters::new(-1.0, 0.0).validate(),
            Err(GeometryError::NegativeScaleWidth(-1.0))
        );
        assert!(matches!(
            RadiusParameters::new(200.0, 0.0).validate(),
            Err(GeometryError::NonPositiveRadius { .. })
        ));
    }
}
