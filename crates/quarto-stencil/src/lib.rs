/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line-oriented template compiler for Quarto.
//!
//! This crate translates stencil source — literal text mixed with embedded
//! host expressions and block statements — into Rust render code that builds
//! its output by appending fragments to a buffer. Translation happens ahead
//! of time; nothing is interpreted at render time.
//!
//! Template notation:
//!
//! - `#...` — comment, dropped.
//! - `:<stmt>` — host statement at the current scope; a statement whose
//!   stripped text is exactly `end` closes the innermost open block.
//! - anything else — template text. Embedded sigils: `${expr}` escaped
//!   interpolation, `#{expr}` mark-safe interpolation, `&{expr}` attribute
//!   string from a mapping expression, `%{target args}` format call. All
//!   payloads may contain nested balanced `{...}` runs.
//! - a trailing `\` joins with the next text line without a newline.
//!
//! # Architecture
//!
//! Input lines are classified once ([`Line`]), queued with push-back
//! ([`LineStream`]), and dispatched by a [`Context`] through a
//! priority-ordered chain of [`Handler`] strategies. Block handlers recurse
//! into the same dispatch loop one scope deeper; the generated line's scope
//! drives re-indentation at render time. The generated code expects
//! `escape`, `mark_safe`, `attrs`, `interruptable`, and `ResourceStack` in
//! scope; the escaping implementation itself lives outside this crate.
//!
//! # Example
//!
//! ```
//! use quarto_stencil::Translator;
//!
//! let code = Translator::new().translate("hello ${name}").unwrap();
//! assert!(code.contains("escape(name)"));
//! ```

pub mod attrs;
pub mod chunk;
pub mod context;
pub mod error;
pub mod handlers;
pub mod iterate;
pub mod line;
pub mod stream;

// Re-export main types at crate root
pub use attrs::{attrs, quote_attribute};
pub use chunk::{Chunk, ChunkTag, Chunker, Dangling, chunk};
pub use context::{Context, Translator};
pub use error::{TranslateError, TranslateResult};
pub use handlers::{
    CodeHandler, CommentHandler, Handler, TextHandler, UsingHandler, default_handlers,
};
pub use iterate::{Iterate, Iteration, interruptable, iterate};
pub use line::{Line, LineKind};
pub use stream::LineStream;
