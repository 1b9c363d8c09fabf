//! Token types produced by the tokenizer
//!
//! - [`Token`]: one classified unit with its raw text, optional coerced value and span
//! - [`TokenKind`]: comment, keyword, literal, identifier or unknown
//! - [`LiteralCategory`]: the built-in `string`, `number`, `boolean` shapes or a custom tag
//! - [`Value`]: the closed payload stored per `(kind, name)` in a token store

pub mod token;

pub use token::{LiteralCategory, Token, TokenKind, Value};
