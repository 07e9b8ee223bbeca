//! File-backed color table for the `external` palette mode.
//!
//! The table lives in a CSV file (`name,r,g,b`). A missing file is created
//! with [`ColorTable::seed_table`] the first time it is needed; an existing
//! file is never modified.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use blob_poster_core::color_table::{ColorTable, ColorTableProvider};
use blob_poster_core::error::PosterError;

/// Default palette file name, relative to the working directory.
pub const DEFAULT_PALETTE_FILE: &str = "palette.csv";

/// A [`ColorTableProvider`] reading a CSV file, bootstrapping it if absent.
#[derive(Debug, Clone)]
pub struct ColorTableFile {
    path: PathBuf,
}

impl ColorTableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the seed table if the file does not exist yet.
    ///
    /// Returns `true` if the file was created.
    pub fn ensure_exists(&self) -> Result<bool, PosterError> {
        if self.path.exists() {
            return Ok(false);
        }
        let text = ColorTable::seed_table().to_csv()?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        tracing::info!(path = %self.path.display(), "created default palette file");
        Ok(true)
    }

    /// Reads and parses the table without bootstrapping.
    pub fn read(&self) -> Result<ColorTable, PosterError> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let table = ColorTable::parse_csv(&text)?;
        tracing::debug!(path = %self.path.display(), rows = table.len(), "read palette file");
        Ok(table)
    }

    fn io_error(&self, e: std::io::Error) -> PosterError {
        let what = match e.kind() {
            ErrorKind::NotFound => "not found".to_string(),
            _ => e.to_string(),
        };
        PosterError::Io(format!("{}: {what}", self.path.display()))
    }
}

impl ColorTableProvider for ColorTableFile {
    fn color_table(&self) -> Result<ColorTable, PosterError> {
        self.ensure_exists()?;
        self.read()
    }
}
