//! Profile-driven tokenizer.
//!
//! Describe a language with a [`ProfileBuilder`], scan text with a [`Tokenizer`] and query
//! the resulting [`TokenStore`] by `(kind, name)`.
//!
//! ```
//! use willno::{ProfileBuilder, Tokenizer};
//!
//! let profile = ProfileBuilder::new("settings.my")
//!     .add_keyword_role("variable", "let")
//!     .add_comment("#")
//!     .add_literal_category("number")
//!     .build()
//!     .unwrap();
//!
//! let store = Tokenizer::new()
//!     .scan("# defaults\nlet x = 1\nlet x = 2\n", &profile)
//!     .unwrap();
//!
//! assert_eq!(store.get_number("variable", "x"), Some(2.0));
//! assert!(store.contains("keyword", "let"));
//! ```

// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod profile;
pub mod symbols;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{ScanError, Tokenizer};
pub use profile::{LanguageProfile, ProfileBuilder, ProfileError};
pub use symbols::{Symbol, TokenStore};
pub use tokens::{LiteralCategory, Token, TokenKind, Value};
