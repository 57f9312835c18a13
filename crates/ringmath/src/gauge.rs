use crate::angle::{AngleRange, NormalizedAngleRange};
use crate::arc::{DrawPrimitive, build_arc};
use crate::format::{ValueFormat, ValueText};
use crate::geometry::{Point, RadiusParameters};
use crate::pointer::{self, OutOfRange};
use crate::value::{self, OffScalePolicy};
use serde::{Deserialize, Serialize};

/// Everything about the gauge except its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub step_size: f64,
    pub angles: AngleRange,
    pub radius: RadiusParameters,
    pub off_scale: OffScalePolicy,
    pub interactive: bool,
    pub value_format: ValueFormat,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            step_size: 0.0,
            angles: AngleRange::default(),
            radius: RadiusParameters::default(),
            off_scale: OffScalePolicy::default(),
            interactive: false,
            value_format: ValueFormat::default(),
        }
    }
}

/// Derived drawing state for one configuration and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub range: NormalizedAngleRange,
    pub value_angle: f64,
    pub scale: DrawPrimitive,
    /// `None` while the value sits at or below the scale start.
    pub trail: Option<DrawPrimitive>,
    pub label: ValueText,
}

impl Scene {
    fn compute(config: &GaugeConfig, value: f64) -> Self {
        let range = config.angles.normalize();
        let radius = config.radius.middle_radius();
        if radius <= 0.0 {
            log::warn!(
                "Degenerate ring: scale width {} leaves radius {}",
                config.radius.scale_width,
                radius
            );
        }

        let scale = build_arc(range.min, range.max, radius);

        if value::is_off_scale(value) {
            log::debug!("Value {} is off-scale ({:?})", value, config.off_scale);
        }
        let value_angle = value::value_to_angle(value, &range, config.off_scale);
        let trail = (value_angle > range.min)
            .then(|| build_arc(range.min, value_angle.min(range.max), radius));

        log::trace!(
            "Recomputed scene: range {:?}, value {} at {:.2}°",
            range,
            value,
            value_angle
        );

        Self {
            range,
            value_angle,
            scale,
            trail,
            label: config.value_format.format(value),
        }
    }
}

/// Current configuration and value of a percentage ring. The [`Scene`] is kept
/// in sync on every mutation.
#[derive(Debug, Clone)]
pub struct GaugeState {
    config: GaugeConfig,
    value: f64,
    scene: Scene,
}

impl Default for GaugeState {
    fn default() -> Self {
        Self::new(GaugeConfig::default(), 0.0)
    }
}

impl GaugeState {
    pub fn new(config: GaugeConfig, value: f64) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value::round_to_step(value, config.step_size)
        };
        let scene = Scene::compute(&config, value);
        Self {
            config,
            value,
            scene,
        }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn value_angle(&self) -> f64 {
        self.scene.value_angle
    }

    pub fn is_interactive(&self) -> bool {
        self.config.interactive
    }

    /// Returns `false` when the value was NaN and therefore ignored.
    pub fn set_value(&mut self, value: f64) -> bool {
        if value.is_nan() {
            log::debug!("Ignoring NaN value");
            return false;
        }
        self.value = value::round_to_step(value, self.config.step_size);
        self.recompute();
        true
    }

    pub fn set_step_size(&mut self, step_size: f64) {
        self.config.step_size = step_size;
        self.value = value::round_to_step(self.value, step_size);
        self.recompute();
    }

    pub fn set_angles(&mut self, min: i32, max: i32) {
        self.config.angles = AngleRange::new(min, max);
        self.recompute();
    }

    pub fn set_scale_width(&mut self, scale_width: f64) {
        self.config.radius.scale_width = scale_width;
        self.recompute();
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.config.interactive = interactive;
    }

    /// Replaces the configuration wholesale; the value is re-rounded to the new step.
    pub fn set_config(&mut self, config: GaugeConfig) {
        self.value = value::round_to_step(self.value, config.step_size);
        self.config = config;
        self.recompute();
    }

    /// Sets the value from a pointer position inside a control of `width` × `height`
    /// pixels. Does nothing unless the gauge is interactive; positions outside the
    /// scale leave the value as is.
    pub fn set_value_from_point(
        &mut self,
        point: Point,
        width: f64,
        height: f64,
    ) -> Result<Option<f64>, OutOfRange> {
        if !self.is_interactive() {
            return Ok(None);
        }

        let center = pointer::center_of(width, height);
        let value = pointer::resolve(point, center, &self.scene.range)?;
        self.set_value(value);
        Ok(Some(self.value))
    }

    fn recompute(&mut self) {
        self.scene = Scene::compute(&self.config, self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CENTER;

    fn config(min: i32, max: i32) -> GaugeConfig {
        GaugeConfig {
            angles: AngleRange::new(min, max),
            ..GaugeConfig::default()
        }
    }

    #[test]
    fn test_full_circle_scale_and_half_trail() {
        let state = GaugeState::new(config(0, 360), 50.0);
        let scene = state.scene();

        assert!(scene.scale.is_full_circle());
        assert_eq!(scene.value_angle, 180.0);
        match scene.trail {
            Some(DrawPrimitive::Arc { is_large_arc, .. }) => assert!(!is_large_arc),
            other => panic!("expected an arc trail, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_value_hides_trail() {
        let state = GaugeState::new(config(-150, 150), 0.0);
        assert_eq!(state.value_angle(), -150.0);
        assert!(state.scene().trail.is_none());
        assert!(!state.scene().scale.is_full_circle());
    }

    #[test]
    fn test_full_value_on_full_circle_draws_circle_trail() {
        let state = GaugeState::new(config(0, 360), 100.0);
        assert!(state.scene().trail.is_some_and(|t| t.is_full_circle()));
    }

    #[test]
    fn test_step_rounding_applies_before_angle() {
        let mut state = GaugeState::new(
            GaugeConfig {
                step_size: 10.0,
                ..config(0, 360)
            },
            0.0,
        );
        state.set_value(77.0);
        assert_eq!(state.value(), 80.0);
        assert_eq!(state.value_angle(), 288.0);
        assert_eq!(state.scene().label.as_str(), "80");
    }

    #[test]
    fn test_step_change_rerounds_value() {
        let mut state = GaugeState::new(config(0, 360), 42.0);
        state.set_step_size(25.0);
        assert_eq!(state.value(), 50.0);
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut state = GaugeState::new(config(0, 360), 30.0);
        assert!(!state.set_value(f64::NAN));
        assert_eq!(state.value(), 30.0);
        assert_eq!(state.value_angle(), 108.0);
    }

    #[test]
    fn test_over_range_trail_stops_at_scale_end() {
        let mut state = GaugeState::new(config(-150, 150), 0.0);
        state.set_config(GaugeConfig {
            off_scale: OffScalePolicy::Extrapolate,
            ..config(-150, 150)
        });
        state.set_value(120.0);
        assert_eq!(state.value_angle(), 157.5);

        let expected = build_arc(-150.0, 150.0, state.config().radius.middle_radius());
        assert_eq!(state.scene().trail, Some(expected));
    }

    #[test]
    fn test_angle_change_moves_trail() {
        let mut state = GaugeState::new(config(0, 360), 50.0);
        state.set_angles(-90, 90);
        assert_eq!(state.value_angle(), 0.0);
    }

    #[test]
    fn test_scale_width_changes_radius() {
        let mut state = GaugeState::new(config(0, 360), 50.0);
        state.set_scale_width(40.0);
        assert_eq!(state.scene().scale.radius(), 80.0);
        assert_eq!(state.scene().trail.map(|t| t.radius()), Some(80.0));
    }

    #[test]
    fn test_pointer_requires_interactive() {
        let mut state = GaugeState::new(config(0, 360), 10.0);
        let right = Point::new(190.0, CENTER.y);
        assert_eq!(state.set_value_from_point(right, 200.0, 200.0), Ok(None));
        assert_eq!(state.value(), 10.0);

        state.set_interactive(true);
        assert!(state.is_interactive());
        let value = state.set_value_from_point(right, 200.0, 200.0).unwrap();
        assert!((value.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_outside_scale_keeps_value() {
        let mut state = GaugeState::new(
            GaugeConfig {
                interactive: true,
                ..config(-150, 150)
            },
            40.0,
        );
        let bottom = Point::new(CENTER.x, 190.0);
        assert!(state.set_value_from_point(bottom, 200.0, 200.0).is_err());
        assert_eq!(state.value(), 40.0);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: GaugeConfig = serde_json::from_str(
            r#"{"step_size": 5.0, "angles": {"min": -150, "max": 150}, "value_format": "P0"}"#,
        )
        .unwrap();
        assert_eq!(config.step_size, 5.0);
        assert_eq!(config.angles, AngleRange::new(-150, 150));
        assert_eq!(config.radius, RadiusParameters::default());
        assert_eq!(config.off_scale, OffScalePolicy::Clamp);
    }
}
