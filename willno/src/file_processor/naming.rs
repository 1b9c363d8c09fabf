//! Identifier splitting shared by profiles and file metadata

use crate::config::constants::naming::NAME_SEPARATOR;

/// Split an identifier such as a file name into `(name, extension)` on the first separator.
///
/// Surrounding whitespace is ignored. Everything after the first separator, including any
/// further separators, is the extension:
///
/// - `main.go` gives `("main", "go")`
/// - `test.config.json` gives `("test", "config.json")`
/// - `script` gives `("script", "")`
///
/// A leading separator is part of the name, so `.env` gives `(".env", "")` and
/// `.eslintrc.json` gives `(".eslintrc", "json")`. The name is only empty when the trimmed
/// input is empty.
pub fn split_identifier(identifier: &str) -> (&str, &str) {
    let trimmed = identifier.trim();

    let search_from = if trimmed.starts_with(NAME_SEPARATOR) {
        NAME_SEPARATOR.len_utf8()
    } else {
        0
    };

    match trimmed[search_from..].find(NAME_SEPARATOR) {
        Some(index) => {
            let split_at = search_from + index;
            (
                &trimmed[..split_at],
                &trimmed[split_at + NAME_SEPARATOR.len_utf8()..],
            )
        }
        None => (trimmed, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_separator() {
        assert_eq!(split_identifier("main.go"), ("main", "go"));
        assert_eq!(split_identifier("test.config.json"), ("test", "config.json"));
        assert_eq!(split_identifier("script"), ("script", ""));
    }

    #[test]
    fn test_leading_separator_belongs_to_name() {
        assert_eq!(split_identifier(".env"), (".env", ""));
        assert_eq!(split_identifier(".eslintrc.json"), (".eslintrc", "json"));
        assert_eq!(split_identifier("."), (".", ""));
    }

    #[test]
    fn test_trailing_separator_and_whitespace() {
        assert_eq!(split_identifier("  notes.txt \n"), ("notes", "txt"));
        assert_eq!(split_identifier("archive."), ("archive", ""));
        assert_eq!(split_identifier("   "), ("", ""));
        assert_eq!(split_identifier(""), ("", ""));
    }
}
