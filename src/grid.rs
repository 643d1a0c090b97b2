//! Finished ASCII output and its text export.

use crate::Result;
use std::fmt;
use std::path::Path;

/// Rows of characters, `height` rows of exactly `width` characters each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AsciiGrid {
    width: u32,
    rows: Vec<String>,
}

impl AsciiGrid {
    pub(crate) fn from_rows(width: u32, rows: Vec<String>) -> Self {
        debug_assert!(rows.iter().all(|r| r.chars().count() == width as usize));
        Self { width, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows joined into one UTF-8 blob, each terminated by a newline.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn write_txt(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
