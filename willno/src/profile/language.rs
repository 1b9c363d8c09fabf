//! The immutable lexical profile a tokenizer scans against

use super::builder::ProfileBuilder;
use crate::tokens::LiteralCategory;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shape test for a custom literal category
pub type Recognizer = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Keyword spellings, comment markers and enabled literal categories for one language.
///
/// Built once through [`ProfileBuilder`] and read-only afterwards, so one profile can be
/// shared by any number of concurrent scans.
#[derive(Clone)]
pub struct LanguageProfile {
    pub(super) identifier: String,
    pub(super) name: String,
    pub(super) extension: String,
    pub(super) keywords: Vec<String>,
    /// spelling -> role
    pub(super) roles: HashMap<String, String>,
    pub(super) comments: Vec<String>,
    /// Distinct non-empty markers, longest first
    pub(super) markers_by_length: Vec<String>,
    pub(super) literals: Vec<LiteralCategory>,
    pub(super) recognizers: HashMap<String, Recognizer>,
}

impl LanguageProfile {
    /// Start a builder for the given identifier (usually a file name)
    pub fn builder(identifier: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(identifier)
    }

    /// The identifier the profile was built from
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty when the identifier has no separator
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Distinct keyword spellings in first-seen order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Comment markers as declared, duplicates included
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Enabled literal categories as declared
    pub fn literals(&self) -> &[LiteralCategory] {
        &self.literals
    }

    pub fn is_keyword(&self, segment: &str) -> bool {
        self.keywords.iter().any(|keyword| keyword == segment)
    }

    /// Role bound to a keyword spelling, e.g. `let` -> `variable`
    pub fn role_of(&self, spelling: &str) -> Option<&str> {
        self.roles.get(spelling).map(String::as_str)
    }

    pub fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }

    pub fn accepts(&self, category: &LiteralCategory) -> bool {
        self.literals.contains(category)
    }

    pub fn recognizer(&self, tag: &str) -> Option<&Recognizer> {
        self.recognizers.get(tag)
    }

    /// The longest comment marker `rest` starts with
    pub fn comment_marker_at(&self, rest: &str) -> Option<&str> {
        self.markers_by_length
            .iter()
            .find(|marker| rest.starts_with(marker.as_str()))
            .map(String::as_str)
    }

    /// Whether any comment marker begins at the start of `rest`
    pub fn starts_comment(&self, rest: &str) -> bool {
        self.comment_marker_at(rest).is_some()
    }
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut recognizers: Vec<&String> = self.recognizers.keys().collect();
        recognizers.sort();

        f.debug_struct("LanguageProfile")
            .field("name", &self.name)
            .field("extension", &self.extension)
            .field("keywords", &self.keywords)
            .field("roles", &self.roles)
            .field("comments", &self.comments)
            .field("literals", &self.literals)
            .field("recognizers", &recognizers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LanguageProfile {
        LanguageProfile::builder("main.go")
            .add_keyword_role("variable", "let")
            .add_keyword("fn")
            .add_comment("#")
            .add_comment("//")
            .add_comment("///")
            .add_comment("")
            .add_literal_category("number")
            .build()
            .unwrap()
    }

    #[test]
    fn test_longest_marker_wins() {
        let profile = sample();

        assert_eq!(profile.comment_marker_at("/// doc"), Some("///"));
        assert_eq!(profile.comment_marker_at("// note"), Some("//"));
        assert_eq!(profile.comment_marker_at("# hash"), Some("#"));
        assert_eq!(profile.comment_marker_at("/ nope"), None);
        assert_eq!(profile.comments().len(), 4);
    }

    #[test]
    fn test_lookups() {
        let profile = sample();

        assert!(profile.is_keyword("let"));
        assert!(profile.is_keyword("fn"));
        assert!(!profile.is_keyword("Let"));
        assert_eq!(profile.role_of("let"), Some("variable"));
        assert_eq!(profile.role_of("fn"), None);
        assert!(profile.accepts(&LiteralCategory::Number));
        assert!(!profile.accepts(&LiteralCategory::String));
    }

    #[test]
    fn test_debug_lists_recognizer_tags() {
        let profile = LanguageProfile::builder("query.sql")
            .add_literal_recognizer("null", |s| s == "NULL")
            .build()
            .unwrap();

        let debug = format!("{:?}", profile);
        assert!(debug.contains("\"null\""));
        assert!(debug.contains("extension: \"sql\""));
    }
}
