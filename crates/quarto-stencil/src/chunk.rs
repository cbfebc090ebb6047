/*
 * chunk.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Splitting template text into tagged chunks.
//!
//! Text is scanned left to right for two-character sigils that open an
//! embedded host expression, closed by `}`. A single depth counter, active
//! only inside an open match, lets expression payloads contain balanced
//! `{...}` runs: a chunk never straddles an unbalanced brace boundary.

/// Embedded-expression kinds, one per sigil. The empty marker (plain text)
/// is implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTag {
    /// Literal template text.
    Text,
    /// `${...}`: escaped interpolation.
    Escape,
    /// `#{...}`: mark-safe (raw) interpolation.
    Raw,
    /// `&{...}`: attribute string built from a mapping expression.
    Attrs,
    /// `%{...}`: format call, target and arguments.
    Format,
}

/// A tagged contiguous span of template text. For sigil chunks the text is
/// the payload between the marker and its closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub tag: ChunkTag,
    pub text: &'a str,
}

/// A sigil that was opened at the given byte offset but never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dangling(pub usize);

const SIGILS: [(&str, ChunkTag); 4] = [
    ("${", ChunkTag::Escape),
    ("#{", ChunkTag::Raw),
    ("&{", ChunkTag::Attrs),
    ("%{", ChunkTag::Format),
];

/// Lazily chunk a text fragment. The returned sequence is finite, ordered,
/// and not restartable.
pub fn chunk(text: &str) -> Chunker<'_> {
    Chunker { text, pos: 0 }
}

/// Iterator state for [`chunk`].
#[derive(Debug)]
pub struct Chunker<'a> {
    text: &'a str,
    pos: usize,
}

fn sigil_at(bytes: &[u8], pos: usize) -> Option<ChunkTag> {
    SIGILS
        .iter()
        .find(|(marker, _)| bytes[pos..].starts_with(marker.as_bytes()))
        .map(|(_, tag)| *tag)
}

impl<'a> Iterator for Chunker<'a> {
    type Item = Result<Chunk<'a>, Dangling>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let mut i = start;
        while i < bytes.len() {
            if let Some(tag) = sigil_at(bytes, i) {
                if i > start {
                    // Flush the plain text run before the sigil; the next
                    // call re-detects the marker.
                    self.pos = i;
                    return Some(Ok(Chunk {
                        tag: ChunkTag::Text,
                        text: &self.text[start..i],
                    }));
                }
                let mut depth = 0usize;
                let mut j = i + 2;
                while j < bytes.len() {
                    match bytes[j] {
                        b'{' => depth += 1,
                        b'}' if depth > 0 => depth -= 1,
                        b'}' => {
                            self.pos = j + 1;
                            return Some(Ok(Chunk {
                                tag,
                                text: &self.text[i + 2..j],
                            }));
                        }
                        _ => {}
                    }
                    j += 1;
                }

                // The closing brace never arrived.
                self.pos = bytes.len();
                return Some(Err(Dangling(i)));
            }
            // Markers and braces are ASCII, so a bytewise walk never lands
            // inside a multi-byte character at a slice boundary.
            i += 1;
        }

        self.pos = bytes.len();
        Some(Ok(Chunk {
            tag: ChunkTag::Text,
            text: &self.text[start..],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(ChunkTag, &str)> {
        chunk(text)
            .map(|c| c.map(|c| (c.tag, c.text)).expect("no dangling sigil"))
            .collect()
    }

    #[test]
    fn test_plain_text_single_chunk() {
        assert_eq!(collect("hello"), vec![(ChunkTag::Text, "hello")]);
    }

    #[test]
    fn test_mixed_text_and_escape() {
        assert_eq!(
            collect("hello ${name}!"),
            vec![
                (ChunkTag::Text, "hello "),
                (ChunkTag::Escape, "name"),
                (ChunkTag::Text, "!"),
            ]
        );
    }

    #[test]
    fn test_all_sigils() {
        assert_eq!(
            collect("${a}#{b}&{c}%{d}"),
            vec![
                (ChunkTag::Escape, "a"),
                (ChunkTag::Raw, "b"),
                (ChunkTag::Attrs, "c"),
                (ChunkTag::Format, "d"),
            ]
        );
    }

    #[test]
    fn test_nested_braces_do_not_close_early() {
        assert_eq!(
            collect(r#"${ {"a":1} }"#),
            vec![(ChunkTag::Escape, r#" {"a":1} "#)]
        );
    }

    #[test]
    fn test_deeply_nested_braces() {
        assert_eq!(
            collect("${f({a: {b: 1}})} tail"),
            vec![
                (ChunkTag::Escape, "f({a: {b: 1}})"),
                (ChunkTag::Text, " tail"),
            ]
        );
    }

    #[test]
    fn test_dangling_sigil_reports_offset() {
        let results: Vec<_> = chunk("ok ${oops").collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Ok(Chunk { tag: ChunkTag::Text, text: "ok " })));
        assert_eq!(results[1], Err(Dangling(3)));
    }

    #[test]
    fn test_multibyte_text_around_sigils() {
        assert_eq!(
            collect("héllo ${name} wörld"),
            vec![
                (ChunkTag::Text, "héllo "),
                (ChunkTag::Escape, "name"),
                (ChunkTag::Text, " wörld"),
            ]
        );
    }
}
