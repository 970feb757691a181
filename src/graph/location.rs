//! Source locations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Position of a declaration in the object-language source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location pointing at the start of a file.
    pub fn file_start(file: impl Into<PathBuf>) -> Self {
        Self::new(file, 0, 0)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
