//! Poster rendering: the two-pass shadow/fill compositing model.
//!
//! Rendering draws onto any [`Surface`], in this order:
//!
//! 1. the canvas background,
//! 2. every layer's shadow (the blob shifted right and down, black, at
//!    15% of the layer's opacity),
//! 3. every layer's fill, in the same order,
//! 4. the title label.
//!
//! All shadows go down before any fill, so shadows form one floor beneath
//! every blob and never darken a fill drawn earlier.

use glam::DVec2;

use crate::canvas::Canvas;
use crate::color::Srgb;
use crate::compose::Layer;
use crate::palette::PaletteMode;

/// Shadow opacity as a fraction of the owning layer's opacity.
pub const SHADOW_OPACITY_FACTOR: f64 = 0.15;

/// Label baseline origin in unit poster space.
pub const LABEL_POSITION: DVec2 = DVec2::new(0.05, 0.95);

/// Label size in typographic points at the reference poster width.
pub const LABEL_SIZE_PT: f64 = 12.0;

/// How a surface should draw a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    pub bold: bool,
    pub color: Srgb,
}

/// A drawing target. Coordinates are in pixels, y down.
///
/// Implementations composite each call with normal alpha-over blending on
/// top of everything drawn before it.
pub trait Surface {
    /// Fills the whole surface with an opaque color.
    fn clear(&mut self, color: Srgb);

    /// Fills a closed polygon; the last point connects back to the first.
    /// `opacity` is in [0, 1].
    fn fill_polygon(&mut self, points: &[DVec2], color: Srgb, opacity: f64);

    /// Draws `text` with its baseline starting at `origin`.
    fn draw_text(&mut self, origin: DVec2, text: &str, style: &TextStyle);
}

/// The title drawn in the top-left corner of every poster.
///
/// Shows the resolved mode name, not the string the caller asked for: an
/// unrecognized name such as `"csv"` has already become `random` by the
/// time a [`PaletteMode`] exists, so the label reads `random`.
pub fn poster_label(mode: PaletteMode) -> String {
    format!("Interactive Poster • {mode}")
}

/// Renders composed layers onto `surface`.
///
/// `shadow_offset` is in unit poster space; shadows move by
/// `(+shadow_offset, -shadow_offset)`, i.e. right and down on the page.
/// Layer order is draw order for both passes. An empty layer slice draws
/// only the background and label.
pub fn render_layers<S: Surface + ?Sized>(
    canvas: &Canvas,
    layers: &[Layer],
    shadow_offset: f64,
    label: &str,
    surface: &mut S,
) {
    surface.clear(canvas.background());

    let offset = DVec2::new(shadow_offset, -shadow_offset);
    for layer in layers {
        let shadow = layer.shape().translated(offset);
        surface.fill_polygon(
            &canvas.polygon_to_pixels(shadow.points()),
            Srgb::BLACK,
            clamp_opacity(layer.opacity() * SHADOW_OPACITY_FACTOR),
        );
    }

    for layer in layers {
        surface.fill_polygon(
            &canvas.polygon_to_pixels(layer.shape().points()),
            layer.color(),
            clamp_opacity(layer.opacity()),
        );
    }

    let style = TextStyle {
        size: canvas.points_to_pixels(LABEL_SIZE_PT),
        bold: true,
        color: Srgb::BLACK,
    };
    surface.draw_text(canvas.to_pixel(LABEL_POSITION), label, &style);
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}
