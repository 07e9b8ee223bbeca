#![deny(unsafe_code)]
//! Output sinks and the file-backed color table for blob-poster.
//!
//! This crate sits between `blob-poster-core` (pure generation and
//! rendering) and the CLI. It owns everything that touches the filesystem:
//! writing SVG or PNG posters and reading/bootstrapping the palette CSV.

pub mod svg_surface;
pub mod table_file;

#[cfg(feature = "png")]
pub mod snapshot;

use std::path::Path;

use blob_poster_core::error::PosterError;
use blob_poster_core::poster::Poster;

pub use svg_surface::SvgSurface;
pub use table_file::{ColorTableFile, DEFAULT_PALETTE_FILE};

/// Output file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Picks the format from the path's extension (case insensitive).
    ///
    /// Returns `PosterError::UnknownFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, PosterError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(PosterError::UnknownFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                ext
            })),
        }
    }
}

/// Renders `poster` to an SVG document string.
pub fn to_svg(poster: &Poster) -> String {
    let mut surface = SvgSurface::for_canvas(poster.canvas());
    poster.render(&mut surface);
    surface.finish()
}

/// Writes `poster` as an SVG file.
pub fn write_svg(poster: &Poster, path: &Path) -> Result<(), PosterError> {
    let mut surface = SvgSurface::for_canvas(poster.canvas());
    poster.render(&mut surface);
    svg::save(path, &surface.into_document())
        .map_err(|e| PosterError::Io(format!("{}: {e}", path.display())))
}

/// Writes `poster` to `path` in the format implied by its extension.
pub fn export(poster: &Poster, path: &Path) -> Result<OutputFormat, PosterError> {
    let format = OutputFormat::from_path(path)?;
    match format {
        OutputFormat::Svg => write_svg(poster, path)?,
        #[cfg(feature = "png")]
        OutputFormat::Png => snapshot::write_png(poster, path)?,
        #[cfg(not(feature = "png"))]
        OutputFormat::Png => {
            return Err(PosterError::UnknownFormat(
                "png (built without the `png` feature)".to_string(),
            ))
        }
    }
    Ok(format)
}
