pub mod view;

pub use view::draw;

pub const VALUE_FONT_FAMILY: &str = "Sans";
pub const VALUE_FONT_SCALE: f64 = 0.6; // font size relative to the inner radius
pub const MIN_FONT_SIZE: f64 = 4.0;
