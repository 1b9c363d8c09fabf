//! Profile-driven tokenizer
//!
//! Scans a text buffer against a [`LanguageProfile`] and fills a [`TokenStore`]. Each
//! position is classified comment first, then keyword, literal, identifier and finally
//! unknown. Only an unclosed quoted string aborts a scan.

use super::classifier::{classify_segment, closing_quote, unescape, Classification};
use crate::config::compile_time::lexical::MAX_COMMENT_LENGTH;
use crate::config::constants::store::COMMENT_KEY_PREFIX;
use crate::config::constants::strings::QUOTE_CHARS;
use crate::config::runtime::ScanPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::profile::LanguageProfile;
use crate::symbols::TokenStore;
use crate::tokens::{LiteralCategory, Token, TokenKind, Value};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success, log_warning};

/// Structural scan failures. Unrecognised shapes never fail; they become `unknown` tokens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("Malformed {category} literal at {span}: opened but never closed")]
    MalformedLiteral {
        category: LiteralCategory,
        span: Span,
    },
}

impl ScanError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScanError::MalformedLiteral { .. } => codes::lexical::MALFORMED_LITERAL,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ScanError::MalformedLiteral { span, .. } => *span,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// Counters for the most recent scan
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub comment_tokens: usize,
    pub keyword_tokens: usize,
    pub literal_tokens: usize,
    pub identifier_tokens: usize,
    pub unknown_tokens: usize,
    pub role_bindings: usize,
    /// Store entries replaced by a later token or binding with the same `(kind, name)`
    pub overwrites: usize,
    pub max_comment_length: usize,
    pub comments_over_limit: usize,
}

impl ScanMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &ScanPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.kind {
            TokenKind::Comment => self.comment_tokens += 1,
            TokenKind::Keyword => self.keyword_tokens += 1,
            TokenKind::Literal => self.literal_tokens += 1,
            TokenKind::Identifier => self.identifier_tokens += 1,
            TokenKind::Unknown => self.unknown_tokens += 1,
        }
    }

    pub(crate) fn record_comment_length(&mut self, length: usize) {
        self.max_comment_length = self.max_comment_length.max(length);
        if length > MAX_COMMENT_LENGTH {
            self.comments_over_limit += 1;
        }
    }

    pub(crate) fn record_binding(&mut self, replaced: bool) {
        self.role_bindings += 1;
        self.record_store_write(replaced);
    }

    pub(crate) fn record_store_write(&mut self, replaced: bool) {
        if replaced {
            self.overwrites += 1;
        }
    }

    /// Count for one kind; zero for every kind when detailed metrics are off
    pub fn count(&self, kind: TokenKind) -> usize {
        match kind {
            TokenKind::Comment => self.comment_tokens,
            TokenKind::Keyword => self.keyword_tokens,
            TokenKind::Literal => self.literal_tokens,
            TokenKind::Identifier => self.identifier_tokens,
            TokenKind::Unknown => self.unknown_tokens,
        }
    }
}

type TokenHook<'h> = Box<dyn FnMut(&Token) + 'h>;
type CompletionHook<'h> = Box<dyn FnMut(&[Token]) + 'h>;

/// Scans text into a [`TokenStore`], calling optional hooks along the way.
///
/// Per-token hooks run before the token is committed to the store, `on_match` first and
/// then `on_keyword_match` for keywords. `on_complete` runs once with every token in scan
/// order, including tokens whose store entries were later overwritten.
pub struct Tokenizer<'h> {
    preferences: ScanPreferences,
    metrics: ScanMetrics,
    on_match: Option<TokenHook<'h>>,
    on_keyword_match: Option<TokenHook<'h>>,
    on_complete: Option<CompletionHook<'h>>,
}

impl<'h> Tokenizer<'h> {
    pub fn new() -> Self {
        Self::with_preferences(ScanPreferences::default())
    }

    pub fn with_preferences(preferences: ScanPreferences) -> Self {
        Self {
            preferences,
            metrics: ScanMetrics::default(),
            on_match: None,
            on_keyword_match: None,
            on_complete: None,
        }
    }

    pub fn on_match(mut self, hook: impl FnMut(&Token) + 'h) -> Self {
        self.on_match = Some(Box::new(hook));
        self
    }

    pub fn on_keyword_match(mut self, hook: impl FnMut(&Token) + 'h) -> Self {
        self.on_keyword_match = Some(Box::new(hook));
        self
    }

    pub fn on_complete(mut self, hook: impl FnMut(&[Token]) + 'h) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &ScanPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: ScanPreferences) {
        self.preferences = preferences;
    }

    /// Scan `source` against `profile`.
    ///
    /// On error no store is returned and `on_complete` is not called. Tokens already
    /// reported through `on_match` stay reported.
    pub fn scan(
        &mut self,
        source: &str,
        profile: &LanguageProfile,
    ) -> Result<TokenStore, ScanError> {
        self.metrics = ScanMetrics::default();

        log_debug!("Scanning source",
            "profile" => profile.identifier(),
            "bytes" => source.len(),
            "keywords" => profile.keywords().len());

        let mut store = TokenStore::new();
        let mut tokens: Vec<Token> = Vec::new();
        let mut binder = RoleBinder::default();
        let bind_roles = self.preferences.bind_keyword_roles && profile.has_roles();
        let mut comment_count = 0usize;

        let mut offset = 0;
        let mut position = Position::start();

        while let Some(ch) = source[offset..].chars().next() {
            let rest = &source[offset..];

            if ch.is_whitespace() {
                offset += ch.len_utf8();
                position = position.advance_before(ch, source[offset..].chars().next());
                continue;
            }

            let token = if let Some(marker) = profile.comment_marker_at(rest) {
                comment_count += 1;
                let len = rest.find(|c: char| c == '\n' || c == '\r').unwrap_or(rest.len());
                let raw = &rest[..len];

                let content_length = raw[marker.len()..].chars().count();
                self.metrics.record_comment_length(content_length);
                if content_length > MAX_COMMENT_LENGTH {
                    log_warning!("Comment exceeds length limit",
                        "line" => position.line,
                        "length" => content_length,
                        "limit" => MAX_COMMENT_LENGTH);
                }

                let name = format!("{}{}", COMMENT_KEY_PREFIX, comment_count);
                Token::new(TokenKind::Comment, name, raw, span_of(position, raw))
            } else if QUOTE_CHARS.contains(&ch)
                && profile.accepts(&LiteralCategory::String)
                && !profile.is_keyword(&rest[..segment_len(rest, profile)])
            {
                self.scan_string(rest, ch, position, profile)?
            } else {
                let raw = &rest[..segment_len(rest, profile)];
                let span = span_of(position, raw);

                match classify_segment(raw, profile) {
                    Classification::Literal(category, value) => {
                        Token::literal(category, raw, value, span)
                    }
                    other => Token::new(other.kind(), raw, raw, span),
                }
            };

            offset += token.raw.len();
            position = token.span.end;

            let role_binder = bind_roles.then_some((&mut binder, profile));
            self.emit(token, &mut store, &mut tokens, role_binder);
        }

        if bind_roles {
            binder.flush(&mut store, &mut self.metrics);
        }

        if let Some(hook) = self.on_complete.as_mut() {
            hook(&tokens);
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Scan completed",
            "profile" => profile.identifier(),
            "tokens" => tokens.len(),
            "entries" => store.len(),
            "keywords" => self.metrics.keyword_tokens,
            "literals" => self.metrics.literal_tokens,
            "unknown" => self.metrics.unknown_tokens,
            "role_bindings" => self.metrics.role_bindings,
            "overwrites" => self.metrics.overwrites);

        Ok(store)
    }

    /// Scan a file read by the file processor, tagging log events with its path
    pub fn scan_file_result(
        &mut self,
        file_result: &FileProcessingResult,
        profile: &LanguageProfile,
    ) -> Result<TokenStore, ScanError> {
        crate::logging::with_file_context(&file_result.metadata.path, || {
            self.scan(&file_result.source, profile)
        })
    }

    fn emit(
        &mut self,
        token: Token,
        store: &mut TokenStore,
        tokens: &mut Vec<Token>,
        binder: Option<(&mut RoleBinder, &LanguageProfile)>,
    ) {
        self.metrics.record_token(&token, &self.preferences);

        if let Some(hook) = self.on_match.as_mut() {
            hook(&token);
        }
        if token.is_keyword() {
            if let Some(hook) = self.on_keyword_match.as_mut() {
                hook(&token);
            }
        }

        let replaced = store.record(&token);
        self.metrics.record_store_write(replaced);

        if let Some((binder, profile)) = binder {
            binder.observe(&token, profile, store, &mut self.metrics);
        }

        tokens.push(token);
    }

    fn scan_string(
        &self,
        rest: &str,
        quote: char,
        position: Position,
        profile: &LanguageProfile,
    ) -> Result<Token, ScanError> {
        let body = &rest[quote.len_utf8()..];

        match closing_quote(body, quote) {
            Some(end) => {
                let raw = &rest[..quote.len_utf8() + end + quote.len_utf8()];
                let value = Value::Text(unescape(&body[..end]));
                Ok(Token::literal(
                    LiteralCategory::String,
                    raw,
                    value,
                    span_of(position, raw),
                ))
            }
            None => {
                let error = ScanError::MalformedLiteral {
                    category: LiteralCategory::String,
                    span: span_of(position, rest),
                };
                let message = if self.preferences.include_position_in_errors {
                    format!(
                        "Unclosed string literal opened at line {}, column {}",
                        position.line, position.column
                    )
                } else {
                    "Unclosed string literal".to_string()
                };

                log_error!(error.error_code(), &message,
                    span = error.span(),
                    "profile" => profile.identifier(),
                    "quote" => quote);
                Err(error)
            }
        }
    }
}

impl Default for Tokenizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn span_of(start: Position, raw: &str) -> Span {
    Span::new(start, start.advance_str(raw))
}

/// Byte length of the bare segment at the start of `rest`: up to whitespace or the start
/// of a comment marker
fn segment_len(rest: &str, profile: &LanguageProfile) -> usize {
    rest.char_indices()
        .skip(1)
        .find(|&(index, ch)| ch.is_whitespace() || profile.starts_comment(&rest[index..]))
        .map(|(index, _)| index)
        .unwrap_or(rest.len())
}

struct PendingBinding {
    role: String,
    name: String,
    span: Span,
}

/// Tracks `<role keyword> <identifier> ... <literal>` on one line
#[derive(Default)]
struct RoleBinder {
    /// Role of the last role keyword and the line it appeared on
    awaiting: Option<(String, u32)>,
    pending: Option<PendingBinding>,
}

impl RoleBinder {
    fn observe(
        &mut self,
        token: &Token,
        profile: &LanguageProfile,
        store: &mut TokenStore,
        metrics: &mut ScanMetrics,
    ) {
        let line = token.span.start.line;
        if self.awaiting.as_ref().is_some_and(|(_, started)| *started != line) {
            self.flush(store, metrics);
        }

        match token.kind {
            TokenKind::Keyword => {
                self.flush(store, metrics);
                if let Some(role) = profile.role_of(&token.name) {
                    self.awaiting = Some((role.to_string(), line));
                }
            }
            TokenKind::Identifier => {
                if self.pending.is_none() {
                    if let Some((role, _)) = &self.awaiting {
                        self.pending = Some(PendingBinding {
                            role: role.clone(),
                            name: token.name.clone(),
                            span: token.span,
                        });
                    }
                }
            }
            TokenKind::Literal => {
                if let Some(pending) = self.pending.take() {
                    self.awaiting = None;
                    let replaced = store.bind(
                        &pending.role,
                        &pending.name,
                        token.stored_value(),
                        token.literal_category.clone(),
                        pending.span,
                    );
                    metrics.record_binding(replaced);
                }
            }
            TokenKind::Comment | TokenKind::Unknown => {}
        }
    }

    /// Bind a pending identifier to its own name
    fn flush(&mut self, store: &mut TokenStore, metrics: &mut ScanMetrics) {
        self.awaiting = None;
        if let Some(pending) = self.pending.take() {
            let value = Value::Raw(pending.name.clone());
            let replaced = store.bind(&pending.role, &pending.name, value, None, pending.span);
            metrics.record_binding(replaced);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessor;
    use crate::profile::ProfileBuilder;
    use assert_matches::assert_matches;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use tempfile::TempDir;

    fn my_lang() -> LanguageProfile {
        ProfileBuilder::new("main.my")
            .add_keyword_role("variable", "let")
            .add_keyword_role("function", "fn")
            .add_keyword("if")
            .add_comment("//")
            .add_comment("#")
            .add_literal_category("string")
            .add_literal_category("number")
            .add_literal_category("boolean")
            .build()
            .unwrap()
    }

    fn scan(source: &str, profile: &LanguageProfile) -> TokenStore {
        Tokenizer::new().scan(source, profile).unwrap()
    }

    #[test]
    fn test_comment_line_then_keyword() {
        let profile = ProfileBuilder::new("script")
            .add_keyword("let")
            .add_comment("//")
            .build()
            .unwrap();

        let mut tokenizer = Tokenizer::new();
        let store = tokenizer
            .scan("// let it be = 1 ?!\nlet", &profile)
            .unwrap();

        assert_eq!(store.get_string("keyword", "let"), Some("let"));
        assert_eq!(
            store.get_string("comment", "comment_1"),
            Some("// let it be = 1 ?!")
        );
        assert!(store.all("unknown").is_empty());
        assert_eq!(tokenizer.metrics().total_tokens, 2);
    }

    #[test]
    fn test_later_binding_overwrites() {
        let profile = my_lang();
        let mut tokenizer = Tokenizer::new();
        let store = tokenizer.scan("let x = 1\nlet x = 2\n", &profile).unwrap();

        assert_eq!(store.get_number("variable", "x"), Some(2.0));
        assert_eq!(store.all("variable").len(), 1);
        assert_eq!(tokenizer.metrics().role_bindings, 2);
        // keyword `let`, identifier `x`, unknown `=` and variable `x` were each replaced once
        assert_eq!(tokenizer.metrics().overwrites, 4);
    }

    #[test]
    fn test_role_without_literal_binds_name() {
        let store = scan("fn main # entry point\nmain", &my_lang());

        assert_eq!(store.get_string("function", "main"), Some("main"));
        assert_eq!(store.get_symbol("function", "main").unwrap().literal_category, None);
    }

    #[test]
    fn test_role_binding_stays_on_one_line() {
        let store = scan("let\nx = 1", &my_lang());

        assert!(store.get("variable", "x").is_none());
        assert_eq!(store.get_number("literal", "1"), Some(1.0));
    }

    #[test]
    fn test_carriage_return_ends_line() {
        let store = scan("let\rx = 1\r\nif\rdone", &my_lang());

        assert!(store.get("variable", "x").is_none());
        assert_eq!(store.get_symbol("identifier", "x").unwrap().span.start.line, 2);
        assert_eq!(store.get_symbol("keyword", "if").unwrap().span.start.line, 3);
        assert_eq!(store.get_symbol("identifier", "done").unwrap().span.start.line, 4);
    }

    #[test]
    fn test_role_binding_keeps_literal_category() {
        let store = scan("let greeting = \"hello world\"", &my_lang());

        let symbol = store.get_symbol("variable", "greeting").unwrap();
        assert_eq!(symbol.value, Value::Text("hello world".into()));
        assert_eq!(symbol.literal_category, Some(LiteralCategory::String));
    }

    #[test]
    fn test_role_binding_can_be_disabled() {
        let preferences = ScanPreferences {
            bind_keyword_roles: false,
            ..Default::default()
        };
        let store = Tokenizer::with_preferences(preferences)
            .scan("let x = 1", &my_lang())
            .unwrap();

        assert!(!store.kinds().contains(&"variable"));
        assert!(store.contains("identifier", "x"));
    }

    #[test]
    fn test_disabled_string_category_is_not_literal() {
        let profile = ProfileBuilder::new("plain")
            .add_keyword("say")
            .add_literal_category("number")
            .build()
            .unwrap();

        let store = scan("say \"hi\" 'open", &profile);

        assert!(store.all("literal").is_empty());
        assert!(store.contains("unknown", "\"hi\""));
        assert!(store.contains("unknown", "'open"));
    }

    #[test]
    fn test_unclosed_string_is_malformed() {
        let completed = Cell::new(false);
        let mut tokenizer = Tokenizer::new().on_complete(|_| completed.set(true));

        let result = tokenizer.scan("let s = \"open\nlet t = 1", &my_lang());

        assert_matches!(
            result,
            Err(ScanError::MalformedLiteral { category: LiteralCategory::String, span })
                if span.start.line == 1 && span.start.column == 9
        );
        assert!(!completed.get());
    }

    #[test]
    fn test_quote_shaped_keywords_win_over_strings() {
        let profile = ProfileBuilder::new("quoted.lisp")
            .add_keyword("'")
            .add_keyword("\"\"\"")
            .add_keyword("true")
            .add_literal_category("string")
            .add_literal_category("boolean")
            .build()
            .unwrap();

        let store = scan("x ' y\n\"\"\" doc\ntrue 'a b'", &profile);

        assert!(store.contains("keyword", "'"));
        assert!(store.contains("keyword", "\"\"\""));
        assert!(store.contains("keyword", "true"));
        assert!(store.contains("identifier", "doc"));
        assert_eq!(store.get_string("literal", "'a b'"), Some("a b"));
        assert!(store.get("literal", "true").is_none());
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let result = Tokenizer::new().scan(r#"x = "a\""#, &my_lang());
        assert_matches!(result, Err(ScanError::MalformedLiteral { .. }));
    }

    #[test]
    fn test_strings_unescape_and_span_lines() {
        let source = "let a = \"tab\\there \\\"q\\\"\"\nlet b = 'two\nlines' b";
        let store = scan(source, &my_lang());

        assert_eq!(store.get_string("variable", "a"), Some("tab\there \"q\""));
        assert_eq!(store.get_string("variable", "b"), Some("two\nlines"));

        let trailing = store.get_symbol("identifier", "b").unwrap();
        assert_eq!(trailing.span.start.line, 3);
    }

    #[test]
    fn test_numbers_and_booleans() {
        let store = scan("-1.5e2 .25 true false 1e", &my_lang());

        assert_eq!(store.get_number("literal", "-1.5e2"), Some(-150.0));
        assert_eq!(store.get_number("literal", ".25"), Some(0.25));
        assert_eq!(store.get_bool("literal", "true"), Some(true));
        assert_eq!(store.get_bool("literal", "false"), Some(false));
        assert!(store.contains("unknown", "1e"));
    }

    #[test]
    fn test_segment_ends_at_comment_marker() {
        let store = scan("x// trailing\r\nif", &my_lang());

        assert!(store.contains("identifier", "x"));
        assert_eq!(store.get_string("comment", "comment_1"), Some("// trailing"));
        assert!(store.contains("keyword", "if"));
    }

    #[test]
    fn test_hooks_run_in_order() {
        let events = RefCell::new(Vec::new());
        let mut tokenizer = Tokenizer::new()
            .on_match(|t| events.borrow_mut().push(format!("match:{}", t.name)))
            .on_keyword_match(|t| events.borrow_mut().push(format!("keyword:{}", t.name)))
            .on_complete(|all| events.borrow_mut().push(format!("complete:{}", all.len())));

        tokenizer.scan("let x", &my_lang()).unwrap();

        assert_eq!(
            *events.borrow(),
            ["match:let", "keyword:let", "match:x", "complete:2"]
        );
    }

    #[test]
    fn test_completion_sees_overwritten_tokens() {
        let seen = RefCell::new(Vec::new());
        let mut tokenizer = Tokenizer::new().on_complete(|all| {
            seen.borrow_mut()
                .extend(all.iter().map(|t| (t.kind, t.span.start.offset)));
        });

        let store = tokenizer.scan("if if", &my_lang()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            *seen.borrow(),
            [(TokenKind::Keyword, 0), (TokenKind::Keyword, 3)]
        );
    }

    #[test]
    fn test_empty_source() {
        let calls = Cell::new(0);
        let store = Tokenizer::new()
            .on_complete(|all| {
                assert!(all.is_empty());
                calls.set(calls.get() + 1);
            })
            .scan(" \n\t ", &my_lang())
            .unwrap();

        assert!(store.is_empty());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_custom_recognizer() {
        let profile = ProfileBuilder::new("pattern.lang")
            .add_keyword("match")
            .add_literal_recognizer("regex", |s| {
                s.len() > 1 && s.starts_with('/') && s.ends_with('/')
            })
            .build()
            .unwrap();

        let store = scan("match /a+b/ /", &profile);

        let symbol = store.get_symbol("literal", "/a+b/").unwrap();
        assert_eq!(symbol.literal_category, Some(LiteralCategory::Custom("regex".into())));
        assert_eq!(symbol.value, Value::Raw("/a+b/".into()));
        assert!(store.contains("unknown", "/"));
    }

    #[test]
    fn test_metrics_respect_preferences() {
        let preferences = ScanPreferences {
            collect_detailed_metrics: false,
            ..Default::default()
        };
        let mut tokenizer = Tokenizer::with_preferences(preferences);
        tokenizer.scan("if x # note", &my_lang()).unwrap();

        assert_eq!(tokenizer.metrics().total_tokens, 3);
        assert_eq!(tokenizer.metrics().count(TokenKind::Keyword), 0);

        let mut detailed = Tokenizer::new();
        detailed.scan("if x # note", &my_lang()).unwrap();
        assert_eq!(detailed.metrics().count(TokenKind::Keyword), 1);
        assert_eq!(detailed.metrics().count(TokenKind::Comment), 1);
        assert_eq!(detailed.metrics().max_comment_length, 5);
    }

    #[test]
    fn test_concurrent_scans_share_profile() {
        let profile = my_lang();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let profile = &profile;
                    scope.spawn(move || {
                        let source = format!("let v = {}\nfn f{}", i, i);
                        Tokenizer::new().scan(&source, profile).unwrap()
                    })
                })
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                let store = handle.join().unwrap();
                assert_eq!(store.get_number("variable", "v"), Some(i as f64));
                assert!(store.contains("function", &format!("f{}", i)));
            }
        });
    }

    #[test]
    fn test_scan_file_result() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.my");
        fs::write(&path, "# config\nlet port = 8080\n").unwrap();

        let file_result = FileProcessor::new()
            .process_file(path.to_str().unwrap())
            .unwrap();
        let store = Tokenizer::new()
            .scan_file_result(&file_result, &my_lang())
            .unwrap();

        assert_eq!(store.get_number("variable", "port"), Some(8080.0));
        assert!(crate::logging::get_current_file_context().is_none());
    }
}
