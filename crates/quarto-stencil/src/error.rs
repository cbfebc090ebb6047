/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template translation.
//!
//! All of these are translation-time failures. Problems inside embedded host
//! expressions are not validated here; they surface when the generated code
//! is itself compiled.

use thiserror::Error;

use crate::line::LineKind;

/// Errors that can occur while translating template source.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Input ended inside a block whose `end` line never arrived.
    #[error("block opened on line {line} is never closed (missing 'end')")]
    UnterminatedBlock { line: usize },

    /// An embedded-expression sigil was opened but its closing brace never
    /// arrived on the same line.
    #[error("unterminated expression on line {line}, column {column}")]
    DanglingSigil { line: usize, column: usize },

    /// A format chunk could not be split into a target expression and its
    /// arguments.
    #[error("cannot split format expression on line {line}: {message}")]
    AmbiguousFormat { line: usize, message: String },

    /// The stream ran out while a handler was re-reading the line it
    /// matched. Unreachable unless a handler mismanages push-back.
    #[error("input ended while a handler was re-reading its line")]
    UnexpectedEnd,

    /// No handler accepted a line. The default chain covers every line
    /// kind, so this indicates a broken custom chain.
    #[error("no handler matched the {kind:?} line {line}; the handler chain is incomplete")]
    NoHandler { line: usize, kind: LineKind },
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
