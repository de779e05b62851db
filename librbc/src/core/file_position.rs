// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `file_position` module defines `FilePosition`, which represents a line/column position in a source file.

use std::fmt;

/// A 1-based line and column position in a B source file.
///
/// `FilePosition` is recorded by the `lexer` for every token so that later stages can report where in the
/// source file an error occurred. B has no preprocessor, so positions always refer to the file as written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilePosition {
    pub line: u32,
    pub column: u32,
}

impl FilePosition {
    /// Creates a position for the given 1-based line and column.
    pub fn new(line: u32, column: u32) -> Self {
        debug_assert!(line > 0 && column > 0);
        Self { line, column }
    }

    /// The position of the first byte of a file.
    pub fn start_of_file() -> Self {
        Self { line: 1, column: 1 }
    }

    /// The position which follows this one after reading `ch`.
    pub fn advanced_past(self, ch: char) -> Self {
        if ch == '\n' { Self { line: self.line + 1, column: 1 } } else { Self { line: self.line, column: self.column + 1 } }
    }
}

impl Default for FilePosition {
    fn default() -> Self {
        Self::start_of_file()
    }
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
