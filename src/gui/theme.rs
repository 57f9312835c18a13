use crate::config::{HexColor, ThemeConfig};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub scale: Srgba<f64>,
    pub trail: Srgba<f64>,
    pub value: Srgba<f64>,
    /// Painted behind the ring; `None` leaves the surface transparent.
    pub background: Option<Srgba<f64>>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl ThemeColors {
    pub fn from_config(theme: &ThemeConfig) -> Self {
        Self {
            scale: to_srgba(theme.scale),
            trail: to_srgba(theme.trail),
            value: to_srgba(theme.value),
            background: None,
        }
    }

    /// Same as [`ThemeColors::from_config`], with the window background taken
    /// from the GTK theme.
    pub fn from_context(context: &gtk::StyleContext, theme: &ThemeConfig) -> Self {
        Self {
            background: Some(Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 1.0),
            )),
            ..Self::from_config(theme)
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn to_srgba(color: HexColor) -> Srgba<f64> {
    let rgb: Srgb<f64> = Srgb::<u8>::from(color).into_format();
    Srgba::new(rgb.red, rgb.green, rgb.blue, 1.0)
}

/// `#rrggbb` form of a color, alpha dropped.
pub fn to_hex(color: Srgba<f64>) -> String {
    let c: Srgba<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.percent-ring-window, .percent-ring-drawing-area {
    background: none;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
