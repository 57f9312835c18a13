//! Angle and geometry engine for a circular percentage ring: a scale arc over a
//! configurable angular range and a trail arc showing a value in `[0, 100]`.
//!
//! All geometry lives on a logical 200×200 canvas with angles in degrees,
//! `0` at the top and growing clockwise.

pub mod angle;
pub mod arc;
pub mod format;
pub mod gauge;
pub mod geometry;
pub mod macros;
pub mod pointer;
pub mod value;

pub use angle::{AngleRange, NormalizedAngleRange, normalize};
pub use arc::{DrawPrimitive, build_arc};
pub use format::{FormatError, ValueFormat, ValueText};
pub use gauge::{GaugeConfig, GaugeState, Scene};
pub use geometry::{GeometryError, Point, RadiusParameters};
pub use pointer::{OutOfRange, resolve};
pub use value::{OffScalePolicy, round_to_step, value_to_angle};
