//! Language profiles: what a tokenizer treats as keywords, comments and literals

pub mod builder;
pub mod error;
pub mod language;
pub mod loader;

pub use builder::ProfileBuilder;
pub use error::{ProfileError, ProfileResult};
pub use language::{LanguageProfile, Recognizer};
pub use loader::{load_builder_for, load_profile, load_profile_for, ProfileDefinition};
