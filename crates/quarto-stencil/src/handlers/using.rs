/*
 * using.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The resource-block handler.
//!
//! `:using <constructor-or-name> <optional args>` wraps its body (through the
//! matching `end`) with guarded-acquisition code: the named resource is
//! constructed, pushed on a resource stack, its entry protocol's output is
//! appended to the buffer, the body runs one scope deeper, and on the way
//! out the exit protocol's output is appended. The entry protocol is
//! interruptable: a sentinel in its fragment sequence suppresses the rest.

use crate::context::Context;
use crate::error::TranslateResult;
use crate::handlers::{Handler, ensure_buffer};
use crate::line::{Line, LineKind};

pub struct UsingHandler;

impl Handler for UsingHandler {
    fn priority(&self) -> i32 {
        25
    }

    fn matches(&self, _context: &Context, line: &Line) -> bool {
        line.kind == LineKind::Code && line.stripped().starts_with("using ")
    }

    fn translate(&self, context: &mut Context, output: &mut Vec<Line>) -> TranslateResult<()> {
        let declaration = context.reread()?;
        let opened_at = declaration.number;
        tracing::trace!(line = opened_at, "entering using block");

        let (_, expression) = declaration.partitioned();
        let (name, args) = match expression.split_once(' ') {
            Some((name, args)) => (name.trim_end(), args.trim_start()),
            None => (expression, ""),
        };
        let constructor = if !args.is_empty() {
            format!("{name}({args})")
        } else if name.contains('(') {
            // Already a call expression; push it verbatim.
            name.to_string()
        } else {
            format!("{name}()")
        };

        if context.set_flag("using") {
            output.push(Line::new(0, "let mut _using_stack = ResourceStack::new();"));
        }
        ensure_buffer(context, output);

        output.push(Line::new(0, format!("_using_stack.push({constructor});")));
        output.push(Line::new(
            0,
            "_buffer.extend(interruptable(_using_stack.enter()));",
        ));
        context.set_flag("dirty");

        output.push(Line::new(0, "{"));
        context.translate_nested(output, opened_at)?;
        output.push(Line::new(0, "}"));

        output.push(Line::new(0, "_buffer.extend(_using_stack.exit());"));
        context.set_flag("dirty");

        tracing::trace!(line = opened_at, "leaving using block");
        Ok(())
    }
}
