//! Profile definitions read from TOML
//!
//! ```toml
//! identifier = "myLang"
//! keywords = ["if", "else"]
//! comments = ["//", "#"]
//! literals = ["string", "number", "boolean"]
//!
//! [roles]
//! variable = "let"
//! function = "fn"
//! ```
//!
//! Every key is optional. Role spellings become keywords too. Custom literal tags can be
//! listed but never match without a recognizer, which only code can supply.

use super::builder::ProfileBuilder;
use super::error::{ProfileError, ProfileResult};
use super::language::LanguageProfile;
use crate::log_error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileDefinition {
    pub identifier: Option<String>,
    pub keywords: Vec<String>,
    pub comments: Vec<String>,
    pub literals: Vec<String>,
    /// role -> keyword spelling
    pub roles: BTreeMap<String, String>,
}

impl ProfileDefinition {
    /// Parse a definition; `origin` names the source in errors
    pub fn from_toml_str(source: &str, origin: &str) -> ProfileResult<Self> {
        toml::from_str(source).map_err(|e| {
            let error = ProfileError::definition_invalid(origin, e.message());
            log_error!(error.error_code(), "Profile definition is not valid",
                "path" => origin,
                "reason" => e.message());
            error
        })
    }

    /// Builder seeded from this definition. `fallback_identifier` is used when the
    /// definition names none.
    pub fn into_builder(self, fallback_identifier: &str) -> ProfileBuilder {
        let identifier = self
            .identifier
            .unwrap_or_else(|| fallback_identifier.to_string());

        let builder = self
            .keywords
            .into_iter()
            .fold(ProfileBuilder::new(identifier), ProfileBuilder::add_keyword);
        let builder = self
            .roles
            .into_iter()
            .fold(builder, |b, (role, spelling)| b.add_keyword_role(role, spelling));
        let builder = self
            .comments
            .into_iter()
            .fold(builder, ProfileBuilder::add_comment);

        self.literals
            .iter()
            .fold(builder, |b, tag| b.add_literal_category(tag))
    }
}

fn read_definition(path: &Path) -> ProfileResult<ProfileDefinition> {
    let origin = path.display().to_string();

    let source = fs::read_to_string(path).map_err(|e| {
        let error = ProfileError::definition_unreadable(&origin, &e);
        log_error!(error.error_code(), "Cannot read profile definition",
            "path" => &origin,
            "io_error" => e);
        error
    })?;

    ProfileDefinition::from_toml_str(&source, &origin)
}

/// Load a profile definition file. Without an `identifier` key the definition file's own
/// name is used.
pub fn load_profile(path: impl AsRef<Path>) -> ProfileResult<LanguageProfile> {
    let path = path.as_ref();
    let definition = read_definition(path)?;
    let fallback = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    definition.into_builder(&fallback).build()
}

/// Load a definition file but take the identifier from the caller, e.g. the scanned file
pub fn load_profile_for(
    path: impl AsRef<Path>,
    identifier: &str,
) -> ProfileResult<LanguageProfile> {
    load_builder_for(path, identifier)?.build()
}

/// Like [`load_profile_for`], but leaves the builder open for further additions
pub fn load_builder_for(
    path: impl AsRef<Path>,
    identifier: &str,
) -> ProfileResult<ProfileBuilder> {
    let mut definition = read_definition(path.as_ref())?;
    definition.identifier = Some(identifier.to_string());
    Ok(definition.into_builder(identifier))
}
