use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("failed to read background {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("background {} is empty", .0.display())]
    Empty(PathBuf),
}

/// Text art drawn under empty cells. Lines shorter than the board are padded
/// with blanks; anything past the board is never looked at.
#[derive(Debug, Clone, Default)]
pub struct Background {
    rows: Vec<Vec<char>>,
}

impl Background {
    pub fn load(path: &Path) -> Result<Self, BackgroundError> {
        let text = fs::read_to_string(path)
            .map_err(|source| BackgroundError::Read { path: path.to_path_buf(), source })?;

        if text.trim().is_empty() {
            return Err(BackgroundError::Empty(path.to_path_buf()));
        }

        Ok(Background::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| line.chars().map(|ch| if ch.is_control() { ' ' } else { ch }).collect())
            .collect();
        Background { rows }
    }

    /// Character at screen column `x`, row `y` of the board area.
    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.rows.get(y).and_then(|row| row.get(x)).copied().unwrap_or(' ')
    }
}
