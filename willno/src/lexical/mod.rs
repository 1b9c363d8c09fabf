//! Lexical scanning with FileProcessingResult integration
//!
//! Turns source text into a [`TokenStore`] using a [`LanguageProfile`], with file-aware
//! logging through the global logging system.

pub mod analyzer;
pub mod classifier;

use crate::config::compile_time::lexical::{MAX_COMMENT_LENGTH, MAX_IDENTIFIER_LENGTH};
use crate::config::runtime::ScanPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::profile::LanguageProfile;
use crate::symbols::TokenStore;
use crate::tokens::{Token, TokenKind};
use std::collections::BTreeMap;

pub use analyzer::{ScanError, ScanMetrics, Tokenizer};
pub use classifier::{classify_segment, Classification};

/// Scan source text with a default tokenizer
pub fn scan(source: &str, profile: &LanguageProfile) -> Result<TokenStore, ScanError> {
    Tokenizer::new().scan(source, profile)
}

/// Scan a processed file with a default tokenizer
pub fn scan_file_result(
    file_result: &FileProcessingResult,
    profile: &LanguageProfile,
) -> Result<TokenStore, ScanError> {
    Tokenizer::new().scan_file_result(file_result, profile)
}

pub fn create_tokenizer<'h>() -> Tokenizer<'h> {
    Tokenizer::new()
}

pub fn create_tokenizer_with_preferences<'h>(preferences: ScanPreferences) -> Tokenizer<'h> {
    Tokenizer::with_preferences(preferences)
}

/// Check that scan error codes are registered and the generated limits are usable
pub fn validate_scan_configuration() -> Result<(), String> {
    let required = [
        codes::lexical::MALFORMED_LITERAL,
        codes::success::TOKENIZATION_COMPLETE,
    ];

    for code in &required {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Scan code {} has no description", code.as_str()));
        }
    }

    if codes::get_error_metadata(codes::lexical::MALFORMED_LITERAL.as_str()).is_none() {
        return Err(format!(
            "Scan code {} not found in metadata registry",
            codes::lexical::MALFORMED_LITERAL.as_str()
        ));
    }

    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }
    if MAX_COMMENT_LENGTH == 0 {
        return Err("MAX_COMMENT_LENGTH cannot be zero".to_string());
    }

    crate::log_debug!("Scan limits validated",
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_comment_length" => MAX_COMMENT_LENGTH);

    Ok(())
}

/// Token distribution of a completed scan
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TokenCounts {
    pub total: usize,
    pub comments: usize,
    pub keywords: usize,
    pub literals: usize,
    pub identifiers: usize,
    pub unknown: usize,
    /// Literal count per category tag
    pub by_category: BTreeMap<String, usize>,
}

impl TokenCounts {
    /// Tokens other than comments
    pub fn significant_tokens(&self) -> usize {
        self.total - self.comments
    }

    pub fn has_content(&self) -> bool {
        self.keywords > 0 || self.identifiers > 0 || self.literals > 0
    }

    /// Share of significant tokens that could not be classified
    pub fn unknown_ratio(&self) -> f64 {
        match self.significant_tokens() {
            0 => 0.0,
            n => self.unknown as f64 / n as f64,
        }
    }
}

/// Summarise a token sequence, e.g. the one handed to `on_complete`
pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in tokens {
        counts.total += 1;
        match token.kind {
            TokenKind::Comment => counts.comments += 1,
            TokenKind::Keyword => counts.keywords += 1,
            TokenKind::Identifier => counts.identifiers += 1,
            TokenKind::Unknown => counts.unknown += 1,
            TokenKind::Literal => {
                counts.literals += 1;
                if let Some(category) = &token.literal_category {
                    *counts
                        .by_category
                        .entry(category.as_str().to_string())
                        .or_insert(0) += 1;
                }
            }
        }
    }

    counts
}
