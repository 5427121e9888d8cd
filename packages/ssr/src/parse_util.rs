//! Parse utilities
//!
//! Byte-offset source spans and collected parse diagnostics. The
//! renderer addresses template HTML exclusively by byte offset, so
//! spans carry no line/column bookkeeping.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into the template HTML source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice the source text this span covers.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A recoverable problem found while parsing template HTML.
///
/// Parsing collects errors instead of aborting; the template registry
/// decides whether any of them is fatal for the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: Span,
    pub msg: String,
}

impl ParseError {
    pub fn new(span: Span, msg: impl Into<String>) -> Self {
        ParseError { span, msg: msg.into() }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.msg, self.span.start)
    }
}
