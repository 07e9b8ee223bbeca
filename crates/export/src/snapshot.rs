//! PNG output: rasterizes a poster's SVG document with `resvg` and saves the
//! pixels with `image`.
//!
//! Feature-gated behind `png` (default on) so that SVG-only builds do not
//! pull in the rasterizer and font database.

use std::path::Path;
use std::sync::Arc;

use blob_poster_core::error::PosterError;
use blob_poster_core::poster::Poster;

use crate::svg_surface::SvgSurface;

/// Rasterizes an SVG document to straight-alpha RGBA8 at `width` x `height`.
///
/// System fonts are loaded for the label; if none are available the label
/// is simply not drawn.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> Result<image::RgbaImage, PosterError> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let opts = usvg::Options {
        fontdb: Arc::new(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| PosterError::Io(format!("svg parse failed: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(PosterError::InvalidDimensions)?;
    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| PosterError::Io("RGBA buffer size mismatch".into()))
}

/// Renders `poster` to an RGBA image the size of its canvas.
pub fn render_image(poster: &Poster) -> Result<image::RgbaImage, PosterError> {
    let canvas = poster.canvas();
    let mut surface = SvgSurface::for_canvas(canvas);
    poster.render(&mut surface);
    rasterize_svg(&surface.finish(), canvas.width(), canvas.height())
}

/// Writes `poster` as a PNG image.
///
/// Returns `PosterError::Io` on rasterization or write failure.
#[tracing::instrument(skip(poster), fields(path = %path.display()))]
pub fn write_png(poster: &Poster, path: &Path) -> Result<(), PosterError> {
    let img = render_image(poster)?;
    img.save(path).map_err(|e| PosterError::Io(e.to_string()))?;
    tracing::debug!(width = img.width(), height = img.height(), "wrote png");
    Ok(())
}
