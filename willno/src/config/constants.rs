//! Fixed lexical conventions. Unlike `compile_time`, these are not tunable per build.

/// Identifier splitting
pub mod naming {
    /// Separates a profile name from its extension (`main.go`)
    pub const NAME_SEPARATOR: char = '.';
}

/// Built-in literal category tags
pub mod literals {
    pub const STRING_TAG: &str = "string";
    pub const NUMBER_TAG: &str = "number";
    pub const BOOLEAN_TAG: &str = "boolean";

    pub const TRUE_SPELLING: &str = "true";
    pub const FALSE_SPELLING: &str = "false";
}

/// Quoted string scanning
pub mod strings {
    pub const QUOTE_CHARS: [char; 2] = ['"', '\''];
    pub const ESCAPE_CHAR: char = '\\';
}

/// Token store keys
pub mod store {
    /// Comments have no natural name; they are keyed `comment_1`, `comment_2`, ...
    pub const COMMENT_KEY_PREFIX: &str = "comment_";
}
