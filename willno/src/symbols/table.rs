//! Token store: the queryable result of one scan, keyed by `(kind, name)`

use crate::tokens::{LiteralCategory, Token, Value};
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stored entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Token kind (`keyword`, `literal`, ...) or a role name (`variable`, ...)
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal_category: Option<LiteralCategory>,
    pub value: Value,
    pub span: Span,
}

/// Two-level map `kind -> name -> Symbol`.
///
/// A later entry for the same `(kind, name)` replaces the earlier one. Missing entries are
/// reported through `Option`, never as errors. Once a scan returns the store is read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStore {
    symbols: HashMap<String, HashMap<String, Symbol>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for `(kind, name)`
    pub fn get(&self, kind: &str, name: &str) -> Option<&Value> {
        self.get_symbol(kind, name).map(|symbol| &symbol.value)
    }

    pub fn get_symbol(&self, kind: &str, name: &str) -> Option<&Symbol> {
        self.symbols.get(kind).and_then(|by_name| by_name.get(name))
    }

    /// Stored value if it is textual (`Text` or `Raw`)
    pub fn get_string(&self, kind: &str, name: &str) -> Option<&str> {
        self.get(kind, name).and_then(Value::as_str)
    }

    /// Stored value if it is a number
    pub fn get_number(&self, kind: &str, name: &str) -> Option<f64> {
        self.get(kind, name).and_then(Value::as_number)
    }

    /// Stored value if it is a boolean
    pub fn get_bool(&self, kind: &str, name: &str) -> Option<bool> {
        self.get(kind, name).and_then(Value::as_bool)
    }

    /// Stored value, or `default` when absent. The default's shape is not checked.
    pub fn get_or<'a>(&'a self, kind: &str, name: &str, default: &'a Value) -> &'a Value {
        self.get(kind, name).unwrap_or(default)
    }

    /// Every value stored under `kind`, in no particular order. Empty for unknown kinds.
    pub fn all(&self, kind: &str) -> Vec<&Value> {
        self.filter(kind, |_| true)
    }

    /// Values under `kind` satisfying `predicate`
    pub fn filter<P>(&self, kind: &str, predicate: P) -> Vec<&Value>
    where
        P: Fn(&Value) -> bool,
    {
        self.symbols
            .get(kind)
            .map(|by_name| {
                by_name
                    .values()
                    .map(|symbol| &symbol.value)
                    .filter(|value| predicate(value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Symbols under `kind`, sorted by source position
    pub fn symbols(&self, kind: &str) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self
            .symbols
            .get(kind)
            .map(|by_name| by_name.values().collect())
            .unwrap_or_default();
        symbols.sort_by_key(|symbol| symbol.span.start.offset);
        symbols
    }

    pub fn contains(&self, kind: &str, name: &str) -> bool {
        self.get_symbol(kind, name).is_some()
    }

    /// Kinds with at least one entry, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Total number of entries across all kinds
    pub fn len(&self) -> usize {
        self.symbols.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a scanned token under its kind. Returns whether an entry was replaced.
    pub(crate) fn record(&mut self, token: &Token) -> bool {
        self.insert(Symbol {
            name: token.name.clone(),
            kind: token.kind.as_str().to_string(),
            literal_category: token.literal_category.clone(),
            value: token.stored_value(),
            span: token.span,
        })
    }

    /// Record a role binding such as `("variable", "x")`. Returns whether an entry was replaced.
    pub(crate) fn bind(
        &mut self,
        role: &str,
        name: &str,
        value: Value,
        literal_category: Option<LiteralCategory>,
        span: Span,
    ) -> bool {
        self.insert(Symbol {
            name: name.to_string(),
            kind: role.to_string(),
            literal_category,
            value,
            span,
        })
    }

    fn insert(&mut self, symbol: Symbol) -> bool {
        self.symbols
            .entry(symbol.kind.clone())
            .or_default()
            .insert(symbol.name.clone(), symbol)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use crate::utils::Position;

    fn span_at(offset: usize) -> Span {
        let start = Position::new(offset, 1, offset as u32 + 1);
        Span::new(start, start.advance_bytes(1))
    }

    fn number(raw: &str, n: f64, offset: usize) -> Token {
        Token::literal(LiteralCategory::Number, raw, Value::Number(n), span_at(offset))
    }

    #[test]
    fn test_empty_store_finds_nothing() {
        let store = TokenStore::new();

        for (kind, name) in [("keyword", "let"), ("", ""), ("variable", "x")] {
            assert!(store.get(kind, name).is_none());
            assert!(store.get_string(kind, name).is_none());
            assert!(store.get_number(kind, name).is_none());
            assert!(!store.contains(kind, name));
        }
        assert!(store.is_empty());
        assert!(store.kinds().is_empty());
    }

    #[test]
    fn test_get_or_returns_default_when_absent() {
        let store = TokenStore::new();

        let default = Value::Text("fallback".into());
        assert_eq!(store.get_or("keyword", "let", &default), &default);

        let empty = Value::Raw(String::new());
        assert_eq!(store.get_or("keyword", "let", &empty), &empty);
    }

    #[test]
    fn test_get_or_ignores_default_shape_when_present() {
        let mut store = TokenStore::new();
        store.record(&number("7", 7.0, 0));

        let default = Value::Boolean(false);
        assert_eq!(store.get_or("literal", "7", &default), &Value::Number(7.0));
    }

    #[test]
    fn test_all_and_filter_on_unknown_kind_are_empty() {
        let store = TokenStore::new();
        assert!(store.all("keyword").is_empty());
        assert!(store.filter("keyword", |_| true).is_empty());
        assert!(store.symbols("keyword").is_empty());
    }

    #[test]
    fn test_typed_accessors() {
        let mut store = TokenStore::new();
        store.record(&number("1.5", 1.5, 0));
        store.record(&Token::literal(
            LiteralCategory::String,
            "\"hi\"",
            Value::Text("hi".into()),
            span_at(4),
        ));
        store.record(&Token::new(TokenKind::Keyword, "let", "let", span_at(9)));
        store.record(&Token::literal(
            LiteralCategory::Boolean,
            "true",
            Value::Boolean(true),
            span_at(13),
        ));

        assert_eq!(store.get_number("literal", "1.5"), Some(1.5));
        assert_eq!(store.get_string("literal", "1.5"), None);
        assert_eq!(store.get_string("literal", "\"hi\""), Some("hi"));
        assert_eq!(store.get_number("literal", "\"hi\""), None);
        assert_eq!(store.get_string("keyword", "let"), Some("let"));
        assert_eq!(store.get_bool("literal", "true"), Some(true));
        assert_eq!(store.kinds(), ["keyword", "literal"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_later_entry_overwrites() {
        let mut store = TokenStore::new();

        assert!(!store.bind("variable", "x", Value::Number(1.0), None, span_at(0)));
        assert!(store.bind("variable", "x", Value::Number(2.0), None, span_at(10)));

        assert_eq!(store.get_number("variable", "x"), Some(2.0));
        assert_eq!(store.get_symbol("variable", "x").unwrap().span, span_at(10));
        assert_eq!(store.all("variable").len(), 1);
    }

    #[test]
    fn test_filter_by_value() {
        let mut store = TokenStore::new();
        store.record(&number("1", 1.0, 0));
        store.record(&number("20", 20.0, 2));
        store.record(&number("300", 300.0, 5));

        let big = store.filter("literal", |v| v.as_number().is_some_and(|n| n > 10.0));
        assert_eq!(big.len(), 2);
        assert!(store.filter("literal", |v| v.as_bool().is_some()).is_empty());

        let ordered: Vec<&str> = store
            .symbols("literal")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(ordered, ["1", "20", "300"]);
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let mut store = TokenStore::new();
        store.record(&Token::new(TokenKind::Keyword, "let", "let", span_at(0)));

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["keyword"]["let"]["value"]["type"], "raw");
        assert_eq!(json["keyword"]["let"]["kind"], "keyword");
        assert!(json["keyword"]["let"].get("literal_category").is_none());
    }
}
