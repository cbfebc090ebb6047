/*
 * stream.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Queue over classified input lines with push-back.
//!
//! Handlers consume lines with [`LineStream::next`] and may reinsert lines
//! they over-read with [`LineStream::push`]; pushing repeatedly gives
//! unbounded lookahead. The original sequence is kept so a driver can
//! [`LineStream::reset`] and re-run the pipeline.

use std::collections::VecDeque;

use crate::line::Line;

/// FIFO buffer of [`Line`]s with a snapshot of the original input.
#[derive(Debug, Clone)]
pub struct LineStream {
    source: Vec<Line>,
    buffer: VecDeque<Line>,
}

impl LineStream {
    /// Split source text into numbered, classified lines (1-based).
    pub fn new(input: &str) -> Self {
        let source: Vec<Line> = input
            .split('\n')
            .enumerate()
            .map(|(index, text)| Line::new(index + 1, text))
            .collect();
        let buffer = source.iter().cloned().collect();
        LineStream { source, buffer }
    }

    /// Number of lines remaining.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the front line. `None` means end of input.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Line> {
        self.buffer.pop_front()
    }

    /// The front line without consuming it.
    pub fn peek(&self) -> Option<&Line> {
        self.buffer.front()
    }

    /// Reinsert one line at the front.
    pub fn push(&mut self, line: Line) {
        self.buffer.push_front(line);
    }

    /// Reinsert several lines at the front, preserving their order.
    pub fn push_all(&mut self, lines: Vec<Line>) {
        for line in lines.into_iter().rev() {
            self.buffer.push_front(line);
        }
    }

    /// Reinsert bare strings at the front, numbering them from the current
    /// front line (or 0 when the stream is empty).
    pub fn push_text(&mut self, texts: &[&str]) {
        let number = self.peek().map(|line| line.number).unwrap_or(0);
        self.push_all(texts.iter().map(|text| Line::new(number, *text)).collect());
    }

    /// Add a line at the tail.
    pub fn append(&mut self, line: Line) {
        self.buffer.push_back(line);
    }

    /// Add bare strings at the tail, numbering them from the current tail
    /// line (or 0 when the stream is empty).
    pub fn append_text(&mut self, texts: &[&str]) {
        let number = self.buffer.back().map(|line| line.number).unwrap_or(0);
        for text in texts {
            self.buffer.push_back(Line::new(number, text.to_string()));
        }
    }

    /// Restore the full original sequence.
    pub fn reset(&mut self) {
        self.buffer = self.source.iter().cloned().collect();
    }
}
