//! Profile construction errors

use crate::logging::codes;
use crate::logging::Code;

pub type ProfileResult<T> = Result<T, ProfileError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid profile '{identifier}': {reason}")]
    InvalidProfile { identifier: String, reason: String },

    #[error("Cannot read profile definition '{path}': {message}")]
    DefinitionUnreadable { path: String, message: String },

    #[error("Invalid profile definition '{path}': {message}")]
    DefinitionInvalid { path: String, message: String },
}

impl ProfileError {
    pub fn invalid_profile(identifier: &str, reason: &str) -> Self {
        Self::InvalidProfile {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn definition_unreadable(path: &str, message: impl ToString) -> Self {
        Self::DefinitionUnreadable {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn definition_invalid(path: &str, message: impl ToString) -> Self {
        Self::DefinitionInvalid {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidProfile { .. } => codes::profile::INVALID_PROFILE,
            Self::DefinitionUnreadable { .. } => codes::profile::DEFINITION_UNREADABLE,
            Self::DefinitionInvalid { .. } => codes::profile::DEFINITION_INVALID,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
