use crate::gui::ring;
use crate::gui::theme::{ThemeColors, to_hex};
use ringmath::GaugeState;
use ringmath::geometry::{CANVAS_SIZE, CENTER};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot tell the output format of {0} (expected .png or .svg)")]
    UnknownFormat(PathBuf),
    #[error("Invalid image size {0}")]
    InvalidSize(i32),
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error(transparent)]
    CairoIo(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes the ring to `path`, picking PNG or SVG from the extension.
pub fn export(
    path: &Path,
    state: &GaugeState,
    colors: &ThemeColors,
    size: i32,
) -> Result<ExportFormat, RenderError> {
    let format =
        ExportFormat::from_path(path).ok_or_else(|| RenderError::UnknownFormat(path.into()))?;

    match format {
        ExportFormat::Png => write_png(path, state, colors, size)?,
        ExportFormat::Svg => fs_err::write(path, render_svg(state, colors, size))?,
    }

    log::info!("Wrote {} ({})", path.display(), format);
    Ok(format)
}

pub fn write_png(
    path: &Path,
    state: &GaugeState,
    colors: &ThemeColors,
    size: i32,
) -> Result<(), RenderError> {
    if size <= 0 {
        return Err(RenderError::InvalidSize(size));
    }

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size)?;
    {
        let cr = cairo::Context::new(&surface)?;
        ring::draw(&cr, state, colors, f64::from(size), f64::from(size))?;
    }

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}

pub fn render_svg(state: &GaugeState, colors: &ThemeColors, size: i32) -> String {
    let scene = state.scene();
    let radius = state.config().radius;
    let inner_radius = radius.middle_radius() - radius.scale_width / 2.0;
    let font_size = (inner_radius * ring::VALUE_FONT_SCALE).max(ring::MIN_FONT_SIZE);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {CANVAS_SIZE} {CANVAS_SIZE}">"#
    );
    if let Some(background) = colors.background {
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            to_hex(background)
        );
    }

    let primitives = std::iter::once((&scene.scale, colors.scale))
        .chain(scene.trail.as_ref().map(|t| (t, colors.trail)));
    for (primitive, color) in primitives {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            primitive.to_svg_path(),
            to_hex(color),
            radius.scale_width
        );
    }

    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" fill="{}" font-family="{}" font-weight="bold" font-size="{font_size}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        CENTER.x,
        CENTER.y,
        to_hex(colors.value),
        ring::VALUE_FONT_FAMILY,
        escape_xml(&scene.label)
    );
    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
