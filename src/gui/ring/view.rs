use super::{MIN_FONT_SIZE, VALUE_FONT_FAMILY, VALUE_FONT_SCALE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use ringmath::geometry::{CANVAS_SIZE, CENTER, Point};
use ringmath::{DrawPrimitive, GaugeState};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

struct PrimitiveRenderer<'a> {
    primitive: &'a DrawPrimitive,
    color: Srgba<f64>,
    line_width: f64,
}

impl<'a> PrimitiveRenderer<'a> {
    fn new(primitive: &'a DrawPrimitive, color: Srgba<f64>, line_width: f64) -> Self {
        Self {
            primitive,
            color,
            line_width,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (r, g, b, a) = self.color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(self.line_width);
        cr.set_line_cap(cairo::LineCap::Butt);
        cr.new_path();

        match *self.primitive {
            DrawPrimitive::FullCircle { center, radius } => {
                cr.arc(center.x, center.y, radius, 0.0, TAU);
            }
            DrawPrimitive::Arc {
                start,
                end,
                radius,
                sweep_clockwise,
                is_large_arc,
            } => {
                let (from, to) = arc_angles(start, end, is_large_arc);
                if sweep_clockwise {
                    cr.arc(CENTER.x, CENTER.y, radius, from, to);
                } else {
                    cr.arc_negative(CENTER.x, CENTER.y, radius, from, to);
                }
            }
        }
        cr.stroke()
    }
}

/// Cairo angles (radians, clockwise from +x) for a clockwise arc between two
/// points on a ring around [`CENTER`]. The large-arc flag settles sweeps that
/// rounding pushed across the 0/2π seam.
fn arc_angles(start: Point, end: Point, is_large_arc: bool) -> (f64, f64) {
    let from = (start.y - CENTER.y).atan2(start.x - CENTER.x);
    let to = (end.y - CENTER.y).atan2(end.x - CENTER.x);

    let mut sweep = (to - from).rem_euclid(TAU);
    if is_large_arc && sweep < FRAC_PI_2 {
        sweep += TAU;
    } else if !is_large_arc && sweep > PI + FRAC_PI_2 {
        sweep = 0.0;
    }

    (from, from + sweep)
}

/// Maps the logical canvas onto a `width` × `height` surface, centered and
/// uniformly scaled.
fn fit_canvas(cr: &Context, width: f64, height: f64) {
    let scale = width.min(height) / CANVAS_SIZE;
    cr.translate(
        (width - CANVAS_SIZE * scale) / 2.0,
        (height - CANVAS_SIZE * scale) / 2.0,
    );
    cr.scale(scale, scale);
}

fn draw_value_text(
    cr: &Context,
    state: &GaugeState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let text = state.scene().label.as_str();
    if text.is_empty() {
        return Ok(());
    }

    let radius = state.config().radius;
    let inner_radius = radius.middle_radius() - radius.scale_width / 2.0;
    let font_size = (inner_radius * VALUE_FONT_SCALE).max(MIN_FONT_SIZE);

    let (r, g, b, a) = colors.value.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.select_font_face(
        VALUE_FONT_FAMILY,
        cairo::FontSlant::Normal,
        cairo::FontWeight::Bold,
    );
    cr.set_font_size(font_size);
    let ext = cr.text_extents(text)?;
    cr.move_to(
        CENTER.x - ext.width() / 2.0 - ext.x_bearing(),
        CENTER.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)?;
    Ok(())
}

pub fn draw(
    cr: &Context,
    state: &GaugeState,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    if let Some(background) = colors.background {
        let (r, g, b, a) = background.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.paint()?;
    }

    cr.save()?;
    fit_canvas(cr, width, height);

    let scene = state.scene();
    let line_width = state.config().radius.scale_width;

    PrimitiveRenderer::new(&scene.scale, colors.scale, line_width).draw(cr)?;
    if let Some(trail) = &scene.trail {
        PrimitiveRenderer::new(trail, colors.trail, line_width).draw(cr)?;
    }
    draw_value_text(cr, state, colors)?;

    cr.restore()
}
