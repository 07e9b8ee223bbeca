//! SVG surface: records draw calls as a standalone SVG document.
//!
//! Each polygon becomes a closed `<path>` with `fill-opacity`, so SVG viewers
//! composite the layers with the same alpha-over model as the renderer
//! expects. The document is also the input of the PNG rasterizer.

use blob_poster_core::canvas::Canvas;
use blob_poster_core::color::Srgb;
use blob_poster_core::render::{Surface, TextStyle};
use glam::DVec2;
use svg::node::element::path::Data;
use svg::node::element::{Path, Rectangle, Text};
use svg::{Document, Node};

/// Font stack used for the poster label.
const FONT_FAMILY: &str = "DejaVu Sans, Helvetica, Arial, sans-serif";

/// A [`Surface`] that builds an SVG document in memory.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    document: Document,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            document: empty_document(width, height),
        }
    }

    /// A surface sized to match `canvas`.
    pub fn for_canvas(canvas: &Canvas) -> Self {
        Self::new(canvas.width(), canvas.height())
    }

    /// Returns the drawn document, e.g. for `svg::save`.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Returns the complete SVG document as text.
    pub fn finish(self) -> String {
        self.document.to_string()
    }
}

fn empty_document(width: u32, height: u32) -> Document {
    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height))
}

impl Surface for SvgSurface {
    fn clear(&mut self, color: Srgb) {
        // Opaque fill over everything: earlier elements can never show through.
        self.document = empty_document(self.width, self.height);
        self.document.append(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", self.width)
                .set("height", self.height)
                .set("fill", color.to_hex()),
        );
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Srgb, opacity: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let data = rest
            .iter()
            .fold(Data::new().move_to(pair(*first)), |d, p| d.line_to(pair(*p)))
            .close();
        self.document.append(
            Path::new()
                .set("d", data)
                .set("fill", color.to_hex())
                .set("fill-opacity", opacity as f32)
                .set("stroke", "none"),
        );
    }

    fn draw_text(&mut self, origin: DVec2, text: &str, style: &TextStyle) {
        let weight = if style.bold { "bold" } else { "normal" };
        self.document.append(
            Text::new(text)
                .set("x", origin.x as f32)
                .set("y", origin.y as f32)
                .set("font-family", FONT_FAMILY)
                .set("font-size", style.size as f32)
                .set("font-weight", weight)
                .set("fill", style.color.to_hex()),
        );
    }
}

fn pair(p: DVec2) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blob_poster_core::{generate, ColorTable, RenderParameters};

    fn style() -> TextStyle {
        TextStyle {
            size: 16.0,
            bold: true,
            color: Srgb::BLACK,
        }
    }

    fn triangle() -> [DVec2; 3] {
        [DVec2::new(1.0, 2.0), DVec2::new(3.5, 4.0), DVec2::new(5.0, 6.25)]
    }

    #[test]
    fn empty_surface_is_a_valid_document_shell() {
        let svg = SvgSurface::new(10, 20).finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 10 20\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn clear_discards_earlier_elements() {
        let mut s = SvgSurface::new(10, 10);
        s.fill_polygon(&triangle(), Srgb::BLACK, 1.0);
        s.clear(Srgb::gray(1.0));
        let svg = s.finish();
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn polygon_is_a_closed_path_with_color_and_opacity() {
        let mut s = SvgSurface::new(10, 10);
        s.fill_polygon(&triangle(), Srgb::new(1.0, 0.0, 0.0), 0.09);
        let svg = s.finish();
        assert!(svg.contains("M1,2"), "{svg}");
        assert!(svg.contains("L3.5,4"), "{svg}");
        assert!(svg.contains("L5,6.25"), "{svg}");
        assert!(svg.contains('z'), "{svg}");
        assert!(svg.contains("fill=\"#ff0000\""), "{svg}");
        assert!(svg.contains("fill-opacity=\"0.09\""), "{svg}");
    }

    #[test]
    fn empty_polygon_is_skipped() {
        let mut s = SvgSurface::new(10, 10);
        s.fill_polygon(&[], Srgb::BLACK, 1.0);
        assert!(!s.finish().contains("<path"));
    }

    #[test]
    fn text_is_escaped_and_styled() {
        let mut s = SvgSurface::new(10, 10);
        s.draw_text(DVec2::new(1.0, 2.0), "a < b & c", &style());
        let svg = s.finish();
        assert!(svg.contains("a &lt; b &amp; c"), "{svg}");
        assert!(!svg.contains("a < b"), "{svg}");
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn rendered_poster_has_shadows_before_fills() {
        let params = RenderParameters {
            layer_count: 3,
            ..RenderParameters::default()
        };
        let poster = generate(&params, &ColorTable::seed_table()).unwrap();
        let mut s = SvgSurface::for_canvas(poster.canvas());
        poster.render(&mut s);
        let svg = s.finish();

        let paths: Vec<&str> = svg.lines().filter(|l| l.starts_with("<path")).collect();
        assert_eq!(paths.len(), 6);
        assert!(paths[..3].iter().all(|l| l.contains("fill=\"#000000\"")));
        assert!(paths[3..].iter().all(|l| !l.contains("fill=\"#000000\"")));
        assert!(svg.contains("Interactive Poster • pastel"));
        let last_path = svg.rfind("<path").unwrap();
        assert!(svg.rfind("<text").unwrap() > last_path);
    }
}
