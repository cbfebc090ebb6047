/*
 * code.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fallback handlers for comment and code lines.

use crate::context::Context;
use crate::error::TranslateResult;
use crate::handlers::Handler;
use crate::line::{Line, LineKind};

/// Drops comment lines from the output.
pub struct CommentHandler;

impl Handler for CommentHandler {
    fn priority(&self) -> i32 {
        -50
    }

    fn matches(&self, _context: &Context, line: &Line) -> bool {
        line.kind == LineKind::Comment
    }

    fn translate(&self, context: &mut Context, _output: &mut Vec<Line>) -> TranslateResult<()> {
        context.reread()?;
        Ok(())
    }
}

/// Catch-all for code lines: re-emits the verbatim host statement at the
/// current scope. Keyword handlers must sort before this one.
pub struct CodeHandler;

impl Handler for CodeHandler {
    fn priority(&self) -> i32 {
        100
    }

    fn matches(&self, _context: &Context, line: &Line) -> bool {
        line.kind == LineKind::Code
    }

    fn translate(&self, context: &mut Context, output: &mut Vec<Line>) -> TranslateResult<()> {
        let line = context.reread()?;
        output.push(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Translator;

    #[test]
    fn test_code_reindented_ignoring_source_indentation() {
        let output = Translator::new().translate(":      let x = 1;").unwrap();
        assert_eq!(output, "let x = 1;");
    }

    #[test]
    fn test_interleaved_comments_vanish() {
        let output = Translator::new()
            .translate("# before\n:let x = 1;\n# after")
            .unwrap();
        assert_eq!(output, "let x = 1;");
    }
}
