//! Token store returned by a scan

pub mod table;

pub use table::{Symbol, TokenStore};

/// Render a store grouped by kind, one `name = value` line per entry in source order
pub fn format_store(store: &TokenStore) -> String {
    let mut output = String::new();

    for kind in store.kinds() {
        output.push_str(&format!("[{}]\n", kind));
        for symbol in store.symbols(kind) {
            output.push_str(&format!("  {} = {}\n", symbol.name, symbol.value));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind};
    use crate::utils::Span;

    #[test]
    fn test_format_store_groups_by_kind() {
        let mut store = TokenStore::new();
        store.record(&Token::new(TokenKind::Keyword, "let", "let", Span::dummy()));
        store.record(&Token::new(TokenKind::Identifier, "x", "x", Span::dummy()));

        assert_eq!(
            format_store(&store),
            "[identifier]\n  x = x\n[keyword]\n  let = let\n"
        );
    }

    #[test]
    fn test_format_empty_store() {
        assert_eq!(format_store(&TokenStore::new()), "");
    }
}
