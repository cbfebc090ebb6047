/*
 * line.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Classified source lines.
//!
//! A [`Line`] is the unit of work for the whole pipeline: input lines are
//! classified once at construction, and output lines reuse the same type so
//! handlers can annotate them with a generation scope before rendering.

use std::fmt;

/// One indentation unit of generated code.
pub const INDENT: &str = "    ";

/// The classification of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `#`-prefixed; inert, dropped from output.
    Comment,
    /// `:`-prefixed; a verbatim host statement.
    Code,
    /// Anything else; template text subject to chunking.
    Text,
}

/// A rich description of a line of input or output.
///
/// `kind` and `continued` are derived once at construction and never change.
/// `scope` starts unset and is stamped by the dispatch loop at emission time;
/// a handler may set it explicitly to close a multi-line call at a shallower
/// level. A line with unset scope renders raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
    pub scope: Option<usize>,
    pub kind: LineKind,
    pub continued: bool,
}

impl Line {
    /// Classify a line of text. Code lines lose their `:` marker and any
    /// whitespace that follows it.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        let mut text = text.into();
        let stripped = text.trim();
        let continued = stripped.ends_with('\\');

        let kind = if stripped.starts_with('#') {
            LineKind::Comment
        } else if let Some(rest) = stripped.strip_prefix(':') {
            text = rest.trim_start().to_string();
            LineKind::Code
        } else {
            LineKind::Text
        };

        Line {
            number,
            text,
            scope: None,
            kind,
            continued,
        }
    }

    /// Construct a line with an explicit generation scope.
    pub fn scoped(number: usize, text: impl Into<String>, scope: usize) -> Self {
        let mut line = Line::new(number, text);
        line.scope = Some(scope);
        line
    }

    /// The line text with surrounding whitespace removed.
    pub fn stripped(&self) -> &str {
        self.text.trim()
    }

    /// Split the stripped text at the first space: `(keyword, remainder)`.
    ///
    /// Keyword handlers use this to separate a statement's introducer from
    /// its expression.
    pub fn partitioned(&self) -> (&str, &str) {
        match self.stripped().split_once(' ') {
            Some((prefix, rest)) => (prefix.trim_end(), rest.trim_start()),
            None => (self.stripped(), ""),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            // Blank separator lines never carry indentation.
            Some(_) if self.text.trim().is_empty() => Ok(()),
            Some(scope) => write!(f, "{}{}", INDENT.repeat(scope), self.text.trim_start()),
            None => write!(f, "{}", self.text),
        }
    }
}
