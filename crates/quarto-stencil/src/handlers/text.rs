/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The template-text handler.
//!
//! Gathers contiguous text lines, re-chunks each logical entry, and emits
//! buffered append statements: one `_buffer.push(...)` for a lone fragment,
//! or a `_buffer.extend([...])` call whose arguments sit one scope deeper
//! and whose closer sits one scope shallower than the arguments.

use crate::chunk::{Chunk, ChunkTag, Dangling, chunk};
use crate::context::Context;
use crate::error::{TranslateError, TranslateResult};
use crate::handlers::{Handler, ensure_buffer};
use crate::iterate::iterate;
use crate::line::{INDENT, Line, LineKind};
use crate::stream::LineStream;

/// Column budget for emitted literals, before indentation is subtracted.
const WIDTH: usize = 120;

pub struct TextHandler;

impl Handler for TextHandler {
    fn priority(&self) -> i32 {
        -25
    }

    fn matches(&self, _context: &Context, line: &Line) -> bool {
        line.kind == LineKind::Text
    }

    fn translate(&self, context: &mut Context, output: &mut Vec<Line>) -> TranslateResult<()> {
        ensure_buffer(context, output);

        let entries = gather(&mut context.input);

        // Re-chunk every gathered entry independently; chunk boundaries
        // never cross entries.
        let mut chunks: Vec<(usize, Chunk<'_>)> = Vec::new();
        for (number, text) in &entries {
            for piece in chunk(text) {
                let piece = piece.map_err(|Dangling(offset)| TranslateError::DanglingSigil {
                    line: *number,
                    column: offset + 1,
                })?;
                chunks.push((*number, piece));
            }
        }

        let indent = if chunks.len() == 1 {
            context.scope
        } else {
            context.scope + 1
        };
        let width = WIDTH.saturating_sub(INDENT.len() * indent);

        let mut fragments: Vec<(usize, String)> = Vec::new();
        for (number, piece) in chunks {
            match piece.tag {
                ChunkTag::Text => {
                    // A literal too wide for the budget becomes several
                    // adjacent fragments; concatenated they render the same.
                    for literal in literal_pieces(piece.text, width) {
                        fragments.push((number, format!("{literal}.into()")));
                    }
                }
                ChunkTag::Escape => fragments.push((number, format!("escape({})", piece.text))),
                ChunkTag::Raw => fragments.push((number, format!("mark_safe({})", piece.text))),
                ChunkTag::Attrs => fragments.push((number, format!("attrs({})", piece.text))),
                ChunkTag::Format => fragments.push((number, split_format(piece.text, number)?)),
            }
        }

        let mut dirty = false;
        for step in iterate(fragments) {
            dirty = true;
            let (number, expr) = step.value;
            if step.first && step.last {
                output.push(Line::scoped(
                    number,
                    format!("_buffer.push({expr});"),
                    context.scope,
                ));
            } else {
                if step.first {
                    output.push(Line::scoped(number, "_buffer.extend([", context.scope));
                }
                output.push(Line::scoped(number, format!("{expr},"), context.scope + 1));
                if step.last {
                    output.push(Line::scoped(number, "]);", context.scope));
                }
            }
        }

        if dirty {
            context.set_flag("dirty");
        }
        Ok(())
    }
}

/// Collect contiguous text lines into logical `(line number, text)` entries.
///
/// A continuation escape joins with the next physical line without a
/// newline; every other line keeps its newline. Blank runs are buffered and
/// flushed only when more non-blank content follows, so trailing blanks at
/// the end of a region are dropped.
fn gather(input: &mut LineStream) -> Vec<(usize, String)> {
    let mut entries: Vec<(usize, String)> = Vec::new();
    let mut blanks: Vec<(usize, String)> = Vec::new();

    while let Some(line) = input.next() {
        if line.kind != LineKind::Text {
            // Put the non-text line back for its own handler.
            input.push(line);
            break;
        }

        let mut value = line.text.trim_end().trim_end_matches('\\').to_string();
        if !line.continued {
            value.push('\n');
        }

        if line.stripped().is_empty() {
            blanks.push((line.number, value));
        } else {
            entries.append(&mut blanks);
            entries.push((line.number, value));
        }
    }

    entries
}

fn rust_literal(text: &str) -> String {
    format!("\"{}\"", text.escape_debug())
}

/// Render text as one or more string literals, each fitting the width
/// budget. Splits prefer newline boundaries.
fn literal_pieces(text: &str, width: usize) -> Vec<String> {
    let width = width.max(16);
    let whole = rust_literal(text);
    if whole.chars().count() <= width {
        return vec![whole];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut columns = 2; // surrounding quotes
    for ch in text.chars() {
        let rendered = ch.escape_debug().count();
        if columns + rendered > width && !current.is_empty() {
            pieces.push(rust_literal(&current));
            current.clear();
            columns = 2;
        }
        current.push(ch);
        columns += rendered;
        if ch == '\n' {
            pieces.push(rust_literal(&current));
            current.clear();
            columns = 2;
        }
    }
    if !current.is_empty() {
        pieces.push(rust_literal(&current));
    }
    pieces
}

/// Split a format chunk into its target expression and arguments.
///
/// The boundary cannot be found by simple splitting, since arguments may
/// contain spaces and nested calls. Parsing the whole chunk as one host
/// expression is expected to fail, and the error's offset approximates
/// where the target expression ends; the split lands on the last whitespace
/// at or before that offset. Known limitation: a target expression with
/// internal unparenthesized spaces splits too early.
fn split_format(text: &str, number: usize) -> TranslateResult<String> {
    let error = match syn::parse_str::<syn::Expr>(text) {
        Ok(_) => {
            return Err(TranslateError::AmbiguousFormat {
                line: number,
                message: "expression parsed cleanly, leaving no argument boundary".to_string(),
            });
        }
        Err(error) => error,
    };

    let column = error.span().start().column;
    let boundary = text
        .char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());
    let split =
        text[..boundary]
            .rfind(' ')
            .ok_or_else(|| TranslateError::AmbiguousFormat {
                line: number,
                message: "no whitespace at or before the parse boundary".to_string(),
            })?;

    let target = text[..split].trim_end();
    let args = text[split..].trim_start();
    Ok(format!("mark_safe({target}).format(({args}))"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Translator;
    use pretty_assertions::assert_eq;

    fn translate(source: &str) -> String {
        Translator::new().translate(source).unwrap()
    }

    #[test]
    fn test_single_chunk_direct_push() {
        let output = translate("hello");
        assert!(output.contains("_buffer.push(\"hello\\n\".into());"));
        assert!(!output.contains("_buffer.extend"));
    }

    #[test]
    fn test_multiple_chunks_extend_layout() {
        let output = translate("hello ${name}!");
        let expected = "\nlet mut _buffer: Vec<String> = Vec::new();\n\n\
                        _buffer.extend([\n    \"hello \".into(),\n    escape(name),\n    \"!\\n\".into(),\n]);";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_raw_and_attrs_chunks() {
        let output = translate("#{body}&{attributes}");
        assert!(output.contains("mark_safe(body),"));
        assert!(output.contains("attrs(attributes),"));
    }

    #[test]
    fn test_continuation_joins_without_newline() {
        let output = translate("hello, \\\nworld!");
        assert!(output.contains("\"hello, \".into(),"));
        assert!(output.contains("\"world!\\n\".into(),"));
    }

    #[test]
    fn test_interior_blank_lines_kept_trailing_dropped() {
        let output = translate("top\n\nbottom\n\n");
        assert!(output.contains("\"top\\n\".into(),"));
        assert!(output.contains("\"\\n\".into(),"));
        assert!(output.contains("\"bottom\\n\".into(),"));
        // Exactly one blank fragment: the interior one.
        assert_eq!(output.matches("\"\\n\".into()").count(), 1);
    }

    #[test]
    fn test_leading_blank_line_preserved() {
        let output = translate("\nbody");
        assert!(output.contains("\"\\n\".into(),"));
        assert!(output.contains("\"body\\n\".into(),"));
    }

    #[test]
    fn test_format_chunk_split() {
        let output = translate("%{\"Hello {}!\" name}");
        assert!(output.contains("mark_safe(\"Hello {}!\").format((name)),"));
    }

    #[test]
    fn test_format_chunk_multiple_arguments() {
        let output = translate("%{template first, second}");
        assert!(output.contains("mark_safe(template).format((first, second)),"));
    }

    #[test]
    fn test_format_chunk_full_parse_is_an_error() {
        let err = Translator::new().translate("%{lonely}").unwrap_err();
        assert!(matches!(
            err,
            TranslateError::AmbiguousFormat { line: 1, .. }
        ));
    }

    #[test]
    fn test_dangling_sigil_reports_position() {
        let err = Translator::new().translate("oops ${name").unwrap_err();
        assert!(matches!(
            err,
            TranslateError::DanglingSigil { line: 1, column: 6 }
        ));
    }

    #[test]
    fn test_long_literal_wraps_into_fragments() {
        let long = "x".repeat(300);
        let output = translate(&long);
        assert!(output.contains("_buffer.extend(["));
        assert!(output.matches(".into(),").count() >= 3);
    }

    #[test]
    fn test_literal_pieces_round_trip() {
        let text = "first line\nsecond line\nthird";
        let pieces = literal_pieces(text, 16);
        assert!(pieces.len() > 1);
        for piece in &pieces {
            assert!(piece.starts_with('"') && piece.ends_with('"'));
        }
    }

    #[test]
    fn test_escaped_quotes_in_literals() {
        let output = translate("say \"hi\"");
        assert!(output.contains(r#""say \"hi\"\n""#));
    }
}
