/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line handlers: pluggable translation strategies.
//!
//! A handler pairs a match predicate with a translate procedure. The context
//! tries handlers in ascending priority order and runs the first one that
//! accepts the line; the handler re-reads its line from the stream and may
//! consume many more, including a full nested region.

use std::rc::Rc;

use crate::context::Context;
use crate::error::TranslateResult;
use crate::line::Line;

mod code;
mod text;
mod using;

pub use code::{CodeHandler, CommentHandler};
pub use text::TextHandler;
pub use using::UsingHandler;

/// A stateless translation strategy. Implementations carry no state across
/// invocations; per-job state lives on the [`Context`].
pub trait Handler {
    /// Position in the chain; lower priorities are tried first.
    fn priority(&self) -> i32;

    /// Whether this handler accepts the line.
    fn matches(&self, context: &Context, line: &Line) -> bool;

    /// Consume the matched line (and any lines belonging to it) from the
    /// context's stream and emit zero or more output lines. Emitted lines
    /// without an explicit scope are stamped by the dispatch loop.
    fn translate(&self, context: &mut Context, output: &mut Vec<Line>) -> TranslateResult<()>;
}

/// The built-in chain. Comment/Text/Code coverage is mandatory; keyword
/// handlers like [`UsingHandler`] slot in between.
pub fn default_handlers() -> Vec<Rc<dyn Handler>> {
    vec![
        Rc::new(CommentHandler),
        Rc::new(TextHandler),
        Rc::new(UsingHandler),
        Rc::new(CodeHandler),
    ]
}

/// Emit the one-time output-buffer declaration, guarded by the `text` flag.
pub(crate) fn ensure_buffer(context: &mut Context, output: &mut Vec<Line>) {
    if context.set_flag("text") {
        output.push(Line::new(0, ""));
        output.push(Line::new(0, "let mut _buffer: Vec<String> = Vec::new();"));
        output.push(Line::new(0, ""));
    }
}
