//! Shared source-location types used by the tokenizer, the token store and error reporting.

pub mod span;

pub use span::{Position, SourceMap, Span};
