//! Text to block-letter ASCII via FIGlet fonts.

use crate::{AsciixError, Result};
use figlet_rs::FIGfont;
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT: &str = "standard";
pub const MAX_LETTER_SPACING: usize = 10;

/// Resolves font names to FIGlet fonts.
///
/// `standard` is built in. Other names are looked up as `<name>.flf` in the
/// configured directories, or used directly when they are a path to a
/// `.flf` file.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    dirs: Vec<PathBuf>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    pub fn load(&self, name: &str) -> Result<FIGfont> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(DEFAULT_FONT) {
            return FIGfont::standard().map_err(|e| unsupported(DEFAULT_FONT, &e));
        }

        let path = self
            .resolve(name)
            .ok_or_else(|| AsciixError::UnsupportedFont(name.to_string()))?;
        tracing::debug!(font = name, path = %path.display(), "loading figlet font");
        let content = std::fs::read_to_string(&path)?;
        FIGfont::from_content(&content).map_err(|e| unsupported(name, &e))
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.extension().is_some_and(|ext| ext == "flf") && direct.is_file() {
            return Some(direct.to_path_buf());
        }
        let file = format!("{name}.flf");
        self.dirs
            .iter()
            .flat_map(|dir| [dir.join(&file), dir.join(file.to_lowercase())])
            .find(|p| p.is_file())
    }

    /// Render `text` with the named font, then apply letter spacing.
    pub fn render(&self, text: &str, font: &str, spacing: usize) -> Result<String> {
        if text.trim().is_empty() {
            return Err(AsciixError::InvalidInput("text is empty".into()));
        }
        if spacing > MAX_LETTER_SPACING {
            return Err(AsciixError::InvalidInput(format!(
                "letter spacing must be between 0 and {MAX_LETTER_SPACING}, got {spacing}"
            )));
        }

        let figfont = self.load(font)?;
        let figure = figfont
            .convert(text)
            .ok_or_else(|| AsciixError::UnsupportedFont(format!("{font} cannot render {text:?}")))?;
        Ok(letter_space(&figure.to_string(), spacing))
    }
}

/// Render with the built-in font set.
pub fn render_text(text: &str, font: &str, spacing: usize) -> Result<String> {
    FontLibrary::new().render(text, font, spacing)
}

/// Insert `spacing` spaces between adjacent characters of every line.
pub fn letter_space(art: &str, spacing: usize) -> String {
    if spacing == 0 {
        return art.to_string();
    }
    let gap = " ".repeat(spacing);
    art.split('\n')
        .map(|line| {
            let mut out = String::with_capacity(line.len() * (spacing + 1));
            for (i, c) in line.chars().enumerate() {
                if i > 0 {
                    out.push_str(&gap);
                }
                out.push(c);
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unsupported(font: &str, reason: &str) -> AsciixError {
    AsciixError::UnsupportedFont(format!("{font}: {reason}"))
}
