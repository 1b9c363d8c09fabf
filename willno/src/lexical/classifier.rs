//! Segment classification: keyword, then enabled literal categories, then identifier

use crate::config::compile_time::lexical::MAX_IDENTIFIER_LENGTH;
use crate::config::constants::literals::{FALSE_SPELLING, TRUE_SPELLING};
use crate::config::constants::strings::{ESCAPE_CHAR, QUOTE_CHARS};
use crate::profile::LanguageProfile;
use crate::tokens::{LiteralCategory, TokenKind, Value};

/// Outcome of classifying one bare segment
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Keyword,
    Literal(LiteralCategory, Value),
    Identifier,
    Unknown,
}

impl Classification {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Keyword => TokenKind::Keyword,
            Self::Literal(..) => TokenKind::Literal,
            Self::Identifier => TokenKind::Identifier,
            Self::Unknown => TokenKind::Unknown,
        }
    }
}

/// Classify a whitespace-delimited segment against `profile`.
///
/// Keywords win over literals so a keyword spelled `true` stays a keyword. Literal
/// categories are tried in the order the profile declares them; a category the profile
/// does not enable is never attempted.
pub fn classify_segment(segment: &str, profile: &LanguageProfile) -> Classification {
    if profile.is_keyword(segment) {
        return Classification::Keyword;
    }

    for category in profile.literals() {
        if let Some(value) = match_literal(segment, category, profile) {
            return Classification::Literal(category.clone(), value);
        }
    }

    if is_identifier(segment) {
        Classification::Identifier
    } else {
        Classification::Unknown
    }
}

fn match_literal(
    segment: &str,
    category: &LiteralCategory,
    profile: &LanguageProfile,
) -> Option<Value> {
    match category {
        LiteralCategory::String => {
            quoted_content(segment).map(|content| Value::Text(unescape(content)))
        }
        LiteralCategory::Number => {
            if is_numeral(segment) {
                segment.parse::<f64>().ok().map(Value::Number)
            } else {
                None
            }
        }
        LiteralCategory::Boolean => match segment {
            TRUE_SPELLING => Some(Value::Boolean(true)),
            FALSE_SPELLING => Some(Value::Boolean(false)),
            _ => None,
        },
        LiteralCategory::Custom(tag) => profile
            .recognizer(tag)
            .filter(|recognize| recognize(segment))
            .map(|_| Value::Raw(segment.to_string())),
    }
}

/// Content between matching quotes when the whole segment is one quoted string
fn quoted_content(segment: &str) -> Option<&str> {
    let quote = segment.chars().next()?;
    if !QUOTE_CHARS.contains(&quote) || segment.len() < 2 * quote.len_utf8() {
        return None;
    }

    let inner = &segment[quote.len_utf8()..segment.len() - quote.len_utf8()];
    if !segment.ends_with(quote) || closing_quote(inner, quote).is_some() {
        return None;
    }
    if inner.ends_with(ESCAPE_CHAR) && trailing_escapes(inner) % 2 == 1 {
        return None;
    }
    Some(inner)
}

fn trailing_escapes(text: &str) -> usize {
    text.chars().rev().take_while(|&c| c == ESCAPE_CHAR).count()
}

/// Byte index of the first unescaped `quote` in `text`
pub fn closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == ESCAPE_CHAR {
            escaped = true;
        } else if ch == quote {
            return Some(index);
        }
    }
    None
}

/// Resolve backslash escapes. Unknown escapes stand for the escaped character.
pub fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(ch) = chars.next() {
        if ch != ESCAPE_CHAR {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push(ESCAPE_CHAR),
        }
    }

    result
}

/// Decimal numeral: optional sign, digits with optional fraction (or a leading-dot
/// fraction), optional exponent. Rejects `inf`, `nan` and friends.
pub fn is_numeral(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// A bare name: letter or `_`, then letters, digits or `_`
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let starts_well = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_');

    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && segment.chars().count() <= MAX_IDENTIFIER_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileBuilder;

    fn profile_with(literals: &[&str]) -> LanguageProfile {
        let builder = ProfileBuilder::new("test.lang")
            .add_keyword("let")
            .add_keyword("true");
        literals
            .iter()
            .fold(builder, |b, tag| b.add_literal_category(tag))
            .build()
            .unwrap()
    }

    #[test]
    fn test_numerals() {
        for ok in ["0", "42", "-7", "+3", "1.5", ".5", "5.", "1e10", "2.5E-3", "-0.25e+2"] {
            assert!(is_numeral(ok), "{} should be a numeral", ok);
        }
        for bad in ["", "-", ".", "e5", "1e", "1.2.3", "inf", "NaN", "0x10", "1_000", "12a"] {
            assert!(!is_numeral(bad), "{} should not be a numeral", bad);
        }
    }

    #[test]
    fn test_identifiers() {
        for ok in ["x", "_tmp", "camelCase", "snake_case_2", "café"] {
            assert!(is_identifier(ok), "{}", ok);
        }
        for bad in ["", "2x", "a-b", "=", "\"q\"", "a.b"] {
            assert!(!is_identifier(bad), "{}", bad);
        }
        assert!(!is_identifier(&"a".repeat(MAX_IDENTIFIER_LENGTH + 1)));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"\q\\"), "q\\");
        assert_eq!(unescape(r"tail\"), "tail\\");
    }

    #[test]
    fn test_closing_quote_skips_escapes() {
        assert_eq!(closing_quote(r#"ab\"c"d"#, '"'), Some(5));
        assert_eq!(closing_quote(r#"ab\""#, '"'), None);
        assert_eq!(closing_quote("it's", '"'), None);
    }

    #[test]
    fn test_keyword_beats_literal() {
        let profile = profile_with(&["boolean"]);
        assert_eq!(classify_segment("true", &profile), Classification::Keyword);
        assert_eq!(
            classify_segment("false", &profile),
            Classification::Literal(LiteralCategory::Boolean, Value::Boolean(false))
        );
    }

    #[test]
    fn test_disabled_categories_are_not_attempted() {
        let profile = profile_with(&[]);

        assert_eq!(classify_segment("42", &profile), Classification::Unknown);
        assert_eq!(classify_segment("false", &profile), Classification::Identifier);
        assert_eq!(classify_segment("\"hi\"", &profile), Classification::Unknown);
    }

    #[test]
    fn test_enabled_literals() {
        let profile = profile_with(&["string", "number"]);

        assert_eq!(
            classify_segment("2.5", &profile),
            Classification::Literal(LiteralCategory::Number, Value::Number(2.5))
        );
        assert_eq!(
            classify_segment(r#"'a\'b'"#, &profile),
            Classification::Literal(LiteralCategory::String, Value::Text("a'b".into()))
        );
        assert_eq!(classify_segment(r#""a"b""#, &profile), Classification::Unknown);
        assert_eq!(classify_segment("-", &profile), Classification::Unknown);
    }

    #[test]
    fn test_category_order_decides_overlap() {
        let profile = ProfileBuilder::new("test")
            .add_literal_recognizer("digits", |s| s.chars().all(|c| c.is_ascii_digit()))
            .add_literal_category("number")
            .build()
            .unwrap();

        let digits = LiteralCategory::Custom("digits".into());
        assert_eq!(
            classify_segment("12", &profile),
            Classification::Literal(digits, Value::Raw("12".into()))
        );
        assert_eq!(
            classify_segment("1.5", &profile),
            Classification::Literal(LiteralCategory::Number, Value::Number(1.5))
        );
    }

    #[test]
    fn test_custom_tag_without_recognizer_never_matches() {
        let profile = ProfileBuilder::new("test")
            .add_literal_category("regex")
            .build()
            .unwrap();

        assert_eq!(classify_segment("/a+/", &profile), Classification::Unknown);
        assert_eq!(classify_segment("word", &profile), Classification::Identifier);
    }
}
