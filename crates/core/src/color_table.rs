//! External color tables for the `external` palette mode.
//!
//! A color table is an ordered list of named colors, stored on disk as CSV
//! with the header `name,r,g,b` and channels in [0, 1]. The core only parses
//! and formats table text; reading or bootstrapping a file is the job of a
//! [`ColorTableProvider`] implementation living outside this crate.

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::PosterError;

/// Columns every table must provide. Extra columns are ignored.
const REQUIRED_COLUMNS: [&str; 4] = ["name", "r", "g", "b"];

/// One row of a color table. The name is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, r: f64, g: f64, b: f64) -> Self {
        Self {
            name: name.into(),
            r,
            g,
            b,
        }
    }

    pub fn color(&self) -> Srgb {
        Srgb::new(self.r, self.g, self.b)
    }
}

/// An ordered, read-only table of named colors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorTable {
    rows: Vec<NamedColor>,
}

impl ColorTable {
    pub fn new(rows: Vec<NamedColor>) -> Self {
        Self { rows }
    }

    /// The three-row table written when no palette file exists yet.
    pub fn seed_table() -> Self {
        Self::new(vec![
            NamedColor::new("sky", 0.4, 0.7, 1.0),
            NamedColor::new("sun", 1.0, 0.8, 0.2),
            NamedColor::new("forest", 0.2, 0.6, 0.3),
        ])
    }

    pub fn rows(&self) -> &[NamedColor] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The table's colors in stored order.
    pub fn colors(&self) -> Vec<Srgb> {
        self.rows.iter().map(NamedColor::color).collect()
    }

    /// Parses CSV text with a header row naming at least `name,r,g,b`.
    ///
    /// Columns are located by header name, so their order is free and extra
    /// columns are ignored. Quoted fields follow RFC 4180, blank lines are
    /// skipped and fields are trimmed. Channel values are taken verbatim and
    /// not clamped.
    pub fn parse_csv(text: &str) -> Result<Self, PosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers().map_err(table_error)?;
        let header_line = headers.position().map_or(1, |p| p.line() as usize);
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(PosterError::InvalidColorTable {
                line: header_line,
                reason: "missing header row".to_string(),
            });
        }
        if let Some(column) = REQUIRED_COLUMNS
            .iter()
            .find(|c| !headers.iter().any(|h| h == **c))
        {
            return Err(PosterError::InvalidColorTable {
                line: header_line,
                reason: format!("missing column '{column}'"),
            });
        }

        let rows = reader
            .deserialize::<NamedColor>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(table_error)?;
        Ok(Self { rows })
    }

    /// Formats the table as CSV with a `name,r,g,b` header.
    ///
    /// Names containing commas, quotes or newlines are quoted, so the
    /// output always parses back to the same table.
    pub fn to_csv(&self) -> Result<String, PosterError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(REQUIRED_COLUMNS).map_err(table_error)?;
        for row in &self.rows {
            writer.serialize(row).map_err(table_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PosterError::Io(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PosterError::Io(e.to_string()))
    }
}

/// Maps a csv error to `InvalidColorTable`, keeping its 1-based line.
fn table_error(e: csv::Error) -> PosterError {
    let line = e.position().map_or(1, |p| p.line() as usize);
    let reason = match e.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} columns, got {len}"),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => e.to_string(),
    };
    PosterError::InvalidColorTable { line, reason }
}

/// Source of the external color table.
///
/// The palette generator never touches the filesystem; callers hand it a
/// table obtained through this trait. File-backed implementations may
/// bootstrap a missing file with [`ColorTable::seed_table`].
pub trait ColorTableProvider {
    fn color_table(&self) -> Result<ColorTable, PosterError>;
}

impl ColorTableProvider for ColorTable {
    fn color_table(&self) -> Result<ColorTable, PosterError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_table_has_three_named_rows_in_order() {
        let t = ColorTable::seed_table();
        let names: Vec<&str> = t.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["sky", "sun", "forest"]);
        assert_eq!(t.colors()[1], Srgb::new(1.0, 0.8, 0.2));
    }

    #[test]
    fn parse_csv_reads_pandas_style_output() {
        let text = "name,r,g,b\nsky,0.4,0.7,1.0\nsun,1.0,0.8,0.2\nforest,0.2,0.6,0.3\n";
        assert_eq!(ColorTable::parse_csv(text).unwrap(), ColorTable::seed_table());
    }

    #[test]
    fn parse_csv_locates_columns_by_header_name() {
        let text = "b,g,r,name,extra\n0.3,0.2,0.1,dusk,ignored\n";
        let t = ColorTable::parse_csv(text).unwrap();
        assert_eq!(t.rows()[0], NamedColor::new("dusk", 0.1, 0.2, 0.3));
    }

    #[test]
    fn parse_csv_skips_blank_lines_and_strips_quotes() {
        let text = "\nname, r, g, b\n\n\"rose\", 0.9, 0.2 ,0.4\n\n";
        let t = ColorTable::parse_csv(text).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows()[0].name, "rose");
        assert_eq!(t.rows()[0].g, 0.2);
    }

    #[test]
    fn parse_csv_with_header_only_is_empty_table() {
        let t = ColorTable::parse_csv("name,r,g,b\n").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn parse_csv_rejects_empty_input() {
        assert!(matches!(
            ColorTable::parse_csv("  \n"),
            Err(PosterError::InvalidColorTable { line: 1, .. })
        ));
    }

    #[test]
    fn parse_csv_rejects_missing_column() {
        let err = ColorTable::parse_csv("name,r,g\nsky,0.1,0.2\n").unwrap_err();
        assert!(err.to_string().contains("'b'"), "got: {err}");
    }

    #[test]
    fn parse_csv_reports_line_of_bad_number() {
        let err = ColorTable::parse_csv("name,r,g,b\nsky,0.1,0.2,0.3\nsun,abc,0.2,0.3\n")
            .unwrap_err();
        assert!(
            matches!(err, PosterError::InvalidColorTable { line: 3, .. }),
            "got: {err}"
        );
    }

    #[test]
    fn parse_csv_rejects_ragged_row() {
        let err = ColorTable::parse_csv("name,r,g,b\nsky,0.1,0.2\n").unwrap_err();
        assert!(err.to_string().contains("expected 4 columns"), "got: {err}");
    }

    #[test]
    fn parse_csv_honors_quoted_commas() {
        let t = ColorTable::parse_csv("name,r,g,b\n\"sky, light\",0.4,0.7,1.0\n").unwrap();
        assert_eq!(t.rows(), &[NamedColor::new("sky, light", 0.4, 0.7, 1.0)]);
    }

    #[test]
    fn to_csv_then_parse_preserves_table() {
        let t = ColorTable::new(vec![
            NamedColor::new("a", 0.125, 0.5, 1.0),
            NamedColor::new("b", 0.0, 0.333, 0.75),
        ]);
        assert_eq!(ColorTable::parse_csv(&t.to_csv().unwrap()).unwrap(), t);
    }

    #[test]
    fn to_csv_quotes_names_that_need_it() {
        let t = ColorTable::new(vec![
            NamedColor::new("a,b", 0.1, 0.2, 0.3),
            NamedColor::new("say \"hi\"", 0.4, 0.5, 0.6),
        ]);
        let text = t.to_csv().unwrap();
        assert!(text.starts_with("name,r,g,b\n\"a,b\","), "got: {text}");
        assert_eq!(ColorTable::parse_csv(&text).unwrap(), t);
    }

    #[test]
    fn empty_table_still_writes_header() {
        assert_eq!(ColorTable::default().to_csv().unwrap(), "name,r,g,b\n");
    }

    #[test]
    fn table_is_its_own_provider() {
        let t = ColorTable::seed_table();
        assert_eq!(t.color_table().unwrap(), t);
    }
}
