//! Fluent construction of a [`LanguageProfile`]

use super::error::{ProfileError, ProfileResult};
use super::language::{LanguageProfile, Recognizer};
use crate::file_processor::split_identifier;
use crate::logging::codes;
use crate::tokens::LiteralCategory;
use crate::{log_error, log_success, log_warning};
use std::collections::HashMap;
use std::sync::Arc;

/// Accumulates keywords, comment markers and literal categories.
///
/// ```
/// use willno::ProfileBuilder;
///
/// let profile = ProfileBuilder::new("main.go")
///     .add_keyword_role("variable", "let")
///     .add_keyword("fn")
///     .add_comment("//")
///     .add_literal_category("string")
///     .add_literal_category("number")
///     .build()
///     .unwrap();
///
/// assert_eq!(profile.name(), "main");
/// assert_eq!(profile.extension(), "go");
/// ```
#[derive(Clone)]
pub struct ProfileBuilder {
    identifier: String,
    keywords: Vec<String>,
    roles: HashMap<String, String>,
    comments: Vec<String>,
    literals: Vec<LiteralCategory>,
    recognizers: HashMap<String, Recognizer>,
}

impl ProfileBuilder {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            keywords: Vec::new(),
            roles: HashMap::new(),
            comments: Vec::new(),
            literals: Vec::new(),
            recognizers: HashMap::new(),
        }
    }

    /// Add a keyword spelling. Re-adding a known spelling is a no-op.
    pub fn add_keyword(mut self, spelling: impl Into<String>) -> Self {
        let spelling = spelling.into();
        if !self.keywords.contains(&spelling) {
            self.keywords.push(spelling);
        }
        self
    }

    /// Add a keyword spelling and bind it to a role such as `variable`.
    ///
    /// A scan stores the identifier following the keyword under `(role, identifier)`.
    /// Binding the same spelling again replaces its role.
    pub fn add_keyword_role(
        mut self,
        role: impl Into<String>,
        spelling: impl Into<String>,
    ) -> Self {
        let spelling = spelling.into();
        self.roles.insert(spelling.clone(), role.into());
        self.add_keyword(spelling)
    }

    /// Add a comment-start marker. Duplicates are kept.
    pub fn add_comment(mut self, marker: impl Into<String>) -> Self {
        self.comments.push(marker.into());
        self
    }

    /// Enable a literal category by tag. `string`, `number` and `boolean` are built in;
    /// any other tag is custom and needs a recognizer to ever match.
    pub fn add_literal_category(mut self, tag: &str) -> Self {
        self.literals.push(LiteralCategory::from_tag(tag));
        self
    }

    /// Enable a custom literal category together with its shape test.
    ///
    /// Built-in tags keep their own shapes; a recognizer for one is ignored.
    pub fn add_literal_recognizer<F>(mut self, tag: &str, recognizer: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let category = LiteralCategory::from_tag(tag);
        if category.is_builtin() {
            log_warning!("Recognizer for built-in literal category ignored", "tag" => tag);
            return self;
        }

        self.recognizers.insert(tag.to_string(), Arc::new(recognizer));
        self.literals.push(category);
        self
    }

    /// Freeze into a profile. Fails only when the identifier yields an empty name.
    pub fn build(self) -> ProfileResult<LanguageProfile> {
        let (name, extension) = split_identifier(&self.identifier);

        if name.is_empty() {
            let error = ProfileError::invalid_profile(
                &self.identifier,
                "identifier does not yield a name",
            );
            log_error!(error.error_code(), "Profile identifier is empty",
                "identifier" => &self.identifier);
            return Err(error);
        }

        let mut markers_by_length: Vec<String> = Vec::new();
        for marker in &self.comments {
            if !marker.is_empty() && !markers_by_length.contains(marker) {
                markers_by_length.push(marker.clone());
            }
        }
        markers_by_length.sort_by(|a, b| b.len().cmp(&a.len()));

        let profile = LanguageProfile {
            name: name.to_string(),
            extension: extension.to_string(),
            identifier: self.identifier,
            keywords: self.keywords,
            roles: self.roles,
            comments: self.comments,
            markers_by_length,
            literals: self.literals,
            recognizers: self.recognizers,
        };

        log_success!(codes::success::PROFILE_BUILT, "Language profile built",
            "name" => profile.name(),
            "extension" => profile.extension(),
            "keywords" => profile.keywords().len(),
            "comments" => profile.comments().len(),
            "literals" => profile.literals().len());

        Ok(profile)
    }
}
