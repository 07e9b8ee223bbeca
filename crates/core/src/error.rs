//! Error types for the blob-poster core.

use thiserror::Error;

/// Errors produced outside the compositing path: canvas setup, color and
/// color-table parsing, and I/O performed by sinks and table providers.
///
/// Composing and rendering a poster never fails; edge inputs degrade to a
/// valid (possibly empty) image instead.
#[derive(Debug, Error)]
pub enum PosterError {
    /// Width or height was zero when creating a canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A row of an external color table could not be parsed.
    #[error("invalid color table at line {line}: {reason}")]
    InvalidColorTable { line: usize, reason: String },

    /// An output path had an extension no sink understands.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
