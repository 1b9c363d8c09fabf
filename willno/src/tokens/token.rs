//! Classified tokens and their value payloads
use crate::config::constants::literals::{BOOLEAN_TAG, NUMBER_TAG, STRING_TAG};
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token classes, in classification precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Comment,
    Keyword,
    Literal,
    Identifier,
    Unknown,
}

impl TokenKind {
    pub const ALL: [TokenKind; 5] = [
        TokenKind::Comment,
        TokenKind::Keyword,
        TokenKind::Literal,
        TokenKind::Identifier,
        TokenKind::Unknown,
    ];

    /// Store key for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::Keyword => "keyword",
            TokenKind::Literal => "literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal category a profile can enable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LiteralCategory {
    /// Quoted text
    String,
    /// Decimal or integer numeral
    Number,
    /// `true` / `false`
    Boolean,
    /// Caller-chosen tag matched by a caller-supplied recognizer
    Custom(String),
}

impl LiteralCategory {
    /// Built-in tags map to their variants; anything else is custom
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            STRING_TAG => LiteralCategory::String,
            NUMBER_TAG => LiteralCategory::Number,
            BOOLEAN_TAG => LiteralCategory::Boolean,
            other => LiteralCategory::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LiteralCategory::String => STRING_TAG,
            LiteralCategory::Number => NUMBER_TAG,
            LiteralCategory::Boolean => BOOLEAN_TAG,
            LiteralCategory::Custom(tag) => tag,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, LiteralCategory::Custom(_))
    }
}

impl From<String> for LiteralCategory {
    fn from(tag: String) -> Self {
        LiteralCategory::from_tag(&tag)
    }
}

impl From<LiteralCategory> for String {
    fn from(category: LiteralCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for LiteralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value payload of a stored token
///
/// `Text` is an unescaped string literal, `Raw` is source text kept verbatim (keywords,
/// identifiers, comments, unknown segments and custom literals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Text(String),
    Number(f64),
    Boolean(bool),
    Raw(String),
}

impl Value {
    /// Textual payload, for both `Text` and `Raw`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) | Value::Raw(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Raw(_) => "raw",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{:?}", text),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Raw(raw) => f.write_str(raw),
        }
    }
}

/// One classified unit of source text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Spelling for keywords and identifiers, raw text for literals, `comment_<n>` for comments
    pub name: String,
    /// Set only for literals
    pub literal_category: Option<LiteralCategory>,
    /// Exact source text
    pub raw: String,
    /// Coerced value, set only for literals
    pub value: Option<Value>,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        name: impl Into<String>,
        raw: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            literal_category: None,
            raw: raw.into(),
            value: None,
            span,
        }
    }

    pub fn literal(
        category: LiteralCategory,
        raw: impl Into<String>,
        value: Value,
        span: Span,
    ) -> Self {
        let raw = raw.into();
        Self {
            kind: TokenKind::Literal,
            name: raw.clone(),
            literal_category: Some(category),
            raw,
            value: Some(value),
            span,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
    }

    /// What the token store records: the coerced value, or the raw text when there is none
    pub fn stored_value(&self) -> Value {
        self.value
            .clone()
            .unwrap_or_else(|| Value::Raw(self.raw.clone()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal_category {
            Some(category) => write!(f, "{}({}) {:?}", self.kind, category, self.raw),
            None => write!(f, "{} {:?}", self.kind, self.raw),
        }
    }
}
