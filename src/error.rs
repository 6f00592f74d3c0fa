//! Error types for treemark

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// A single well-formedness fault collected during a parse.
///
/// One malformed document can produce several of these; the parser keeps
/// going where recovery is cheap so callers see every fault at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.span.start, self.message)
    }
}

/// Main error type for treemark
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// Malformed markup or JSON. Carries every diagnostic collected during
    /// the parse, never just the first.
    #[error("parse failed with {} diagnostic(s): {}", .0.len(), format_diagnostics(.0))]
    Parse(Vec<Diagnostic>),

    /// A query was issued before any document was loaded.
    #[error("no document loaded")]
    MissingDocument,

    /// Empty or otherwise unusable input where a non-empty string is required.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// UUID version outside the supported 1..=5 range.
    #[error("unsupported uuid version: {0}")]
    UnsupportedVersion(u8),
}

impl Error {
    /// Single-diagnostic parse error at a position.
    pub fn parse_at(message: impl Into<String>, pos: Pos) -> Self {
        Self::Parse(vec![Diagnostic::new(message, Span::at(pos))])
    }

    /// The diagnostics carried by a parse error, empty for other kinds.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Parse(diags) => diags,
            _ => &[],
        }
    }
}

fn format_diagnostics(diags: &[Diagnostic]) -> String {
    diags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for treemark
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "42:10:5");
    }

    #[test]
    fn test_parse_error_keeps_all_diagnostics() {
        let err = Error::Parse(vec![
            Diagnostic::new("mismatched closing tag", Span::empty()),
            Diagnostic::new("duplicate attribute", Span::empty()),
        ]);
        assert_eq!(err.diagnostics().len(), 2);
        let display = err.to_string();
        assert!(display.contains("2 diagnostic(s)"));
        assert!(display.contains("mismatched closing tag"));
        assert!(display.contains("duplicate attribute"));
    }

    #[test]
    fn test_non_parse_errors_have_no_diagnostics() {
        assert!(Error::MissingDocument.diagnostics().is_empty());
        assert!(Error::UnsupportedVersion(9).diagnostics().is_empty());
    }
}
