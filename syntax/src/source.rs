//! Abstractions over reading files and source code used in the parser.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// A reference to a location in a source file. Useful for error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    /// The line number. Begins at 1.
    pub line: usize,

    /// The column position in the current line. Begins at 1.
    pub column: usize,

    /// Byte offset from the beginning of the file.
    pub offset: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl<'a> From<pest::Position<'a>> for Position {
    fn from(pos: pest::Position<'a>) -> Self {
        let (line, column) = pos.line_col();

        Self {
            line,
            column,
            offset: pos.pos(),
        }
    }
}

/// A span of characters in a source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Span {
    /// The starting position.
    pub start: Position,

    /// The ending position.
    pub end: Position,
}

impl From<Position> for Span {
    fn from(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

impl<'a> From<pest::Span<'a>> for Span {
    fn from(span: pest::Span<'a>) -> Self {
        Self {
            start: span.start_pos().into(),
            end: span.end_pos().into(),
        }
    }
}

/// Holds a template source being parsed in memory.
///
/// Cloning is cheap; the buffer is shared.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: Option<String>,
    buffer: Arc<str>,
}

impl SourceFile {
    /// Create a new source file using an in-memory buffer.
    pub fn buffer(name: impl Into<Option<String>>, buffer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Arc::from(buffer.into()),
        }
    }

    /// Create a named in-memory source file.
    pub fn named(name: impl Into<String>, buffer: impl Into<String>) -> Self {
        Self::buffer(Some(name.into()), buffer)
    }

    /// Open a file as a source file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path.file_name().map(|s| s.to_string_lossy().into_owned());

        fs::read_to_string(path).map(|string| Self::buffer(name, string))
    }

    /// Get the name of the file.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }

    pub fn source(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl<'s> From<&'s str> for SourceFile {
    fn from(source: &'s str) -> Self {
        Self::buffer(None, source)
    }
}

impl From<String> for SourceFile {
    fn from(source: String) -> Self {
        Self::buffer(None, source)
    }
}
