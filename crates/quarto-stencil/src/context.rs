/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The translation context and dispatch loop.
//!
//! [`Context`] owns the input stream, the generation scope, the sticky
//! one-time flags, and the priority-ordered handler chain. The dispatch loop
//! pulls a line, finds the first matching handler, pushes the line back, and
//! lets the handler consume it (possibly along with a whole nested region).
//! Output lines without an explicit scope are stamped with the context's
//! current scope.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::{TranslateError, TranslateResult};
use crate::handlers::{Handler, default_handlers};
use crate::line::{Line, LineKind};
use crate::stream::LineStream;

/// The processing context for one translation job.
pub struct Context {
    pub input: LineStream,
    /// Nesting depth of generated code; drives indentation.
    pub scope: usize,
    flags: HashSet<&'static str>,
    registered: Vec<Rc<dyn Handler>>,
    chain: Vec<Rc<dyn Handler>>,
}

impl Context {
    /// Build a context over source text using the default handler chain.
    pub fn new(source: &str) -> Self {
        Self::with_handlers(source, default_handlers())
    }

    /// Build a context with a custom handler chain.
    pub fn with_handlers(source: &str, handlers: Vec<Rc<dyn Handler>>) -> Self {
        Context {
            input: LineStream::new(source),
            scope: 0,
            flags: HashSet::new(),
            registered: handlers,
            chain: Vec::new(),
        }
    }

    /// Whether a one-time flag has been set.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Set a one-time flag. Returns true the first time, so idempotent
    /// setup code is emitted exactly once per job.
    pub fn set_flag(&mut self, name: &'static str) -> bool {
        self.flags.insert(name)
    }

    /// Reset scope and sort the handler chain ascending by priority.
    /// Invoked lazily once per job.
    pub fn prepare(&mut self) {
        self.scope = 0;
        let mut chain = self.registered.clone();
        chain.sort_by_key(|handler| handler.priority());
        self.chain = chain;
    }

    /// Translate the whole input, yielding the generated lines.
    pub fn translate(&mut self) -> TranslateResult<Vec<Line>> {
        let mut output = Vec::new();
        tracing::debug!(lines = self.input.len(), "translating template");
        self.run(&mut output, None)?;
        Ok(output)
    }

    /// Translate a nested block body one scope deeper. Block handlers call
    /// this after emitting their setup code; the recursion consumes the
    /// block's own `end` line. `opened_at` names the block's opening line
    /// for the missing-`end` error.
    pub fn translate_nested(
        &mut self,
        output: &mut Vec<Line>,
        opened_at: usize,
    ) -> TranslateResult<()> {
        self.scope += 1;
        let result = self.run(output, Some(opened_at));
        self.scope -= 1;
        result
    }

    /// Consume the line a handler matched, so it can be re-read.
    pub fn reread(&mut self) -> TranslateResult<Line> {
        self.input.next().ok_or(TranslateError::UnexpectedEnd)
    }

    fn run(&mut self, output: &mut Vec<Line>, block_start: Option<usize>) -> TranslateResult<()> {
        if self.set_flag("init") {
            self.prepare();
        }

        loop {
            let Some(line) = self.input.next() else {
                // Exhaustion is normal at the top level; inside a block it
                // means the terminator never arrived.
                return match block_start {
                    None => Ok(()),
                    Some(line) => Err(TranslateError::UnterminatedBlock { line }),
                };
            };

            // A bare `end` closes the current level. It is consumed here and
            // never re-emitted; inner blocks therefore consume their own
            // terminator before an outer block ever sees its own.
            if line.kind == LineKind::Code && line.stripped() == "end" {
                tracing::trace!(line = line.number, "closing block");
                return Ok(());
            }

            let handler = self.classify(&line).ok_or(TranslateError::NoHandler {
                line: line.number,
                kind: line.kind,
            })?;
            tracing::trace!(line = line.number, kind = ?line.kind, "dispatching");

            self.input.push(line);
            let mark = output.len();
            handler.translate(self, output)?;

            for line in &mut output[mark..] {
                if line.scope.is_none() {
                    line.scope = Some(self.scope);
                }
            }
        }
    }

    /// Identify the first handler (in priority order) accepting a line.
    fn classify(&self, line: &Line) -> Option<Rc<dyn Handler>> {
        self.chain
            .iter()
            .find(|handler| handler.matches(self, line))
            .cloned()
    }
}

/// Convenience front end over [`Context`]: one instance, many jobs, each
/// with a freshly instantiated handler chain.
pub struct Translator {
    handlers: Vec<Rc<dyn Handler>>,
}

impl Translator {
    pub fn new() -> Self {
        Translator {
            handlers: default_handlers(),
        }
    }

    /// Add a handler to the chain used for subsequent jobs.
    pub fn with_handler(mut self, handler: Rc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Translate source text to generated lines.
    pub fn translate_lines(&self, source: &str) -> TranslateResult<Vec<Line>> {
        Context::with_handlers(source, self.handlers.clone()).translate()
    }

    /// Translate source text to rendered, indented generated code.
    pub fn translate(&self, source: &str) -> TranslateResult<String> {
        let lines = self.translate_lines(source)?;
        Ok(lines
            .iter()
            .map(Line::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
