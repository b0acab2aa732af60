//! Token model for VHDL source text.
//!
//! Tokens are immutable once produced by the scanner; later passes replace
//! tokens with new values rather than mutating in place, so no pass can see
//! another pass's partial rewrite.

use std::collections::HashSet;
use std::sync::LazyLock;

/// VHDL reserved words (VHDL-93 through VHDL-2008).
static VHDL_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abs",
        "access",
        "after",
        "alias",
        "all",
        "and",
        "architecture",
        "array",
        "assert",
        "attribute",
        "begin",
        "block",
        "body",
        "buffer",
        "bus",
        "case",
        "component",
        "configuration",
        "constant",
        "disconnect",
        "downto",
        "else",
        "elsif",
        "end",
        "entity",
        "exit",
        "file",
        "for",
        "function",
        "generate",
        "generic",
        "group",
        "guarded",
        "if",
        "impure",
        "in",
        "inertial",
        "inout",
        "is",
        "label",
        "library",
        "linkage",
        "literal",
        "loop",
        "map",
        "mod",
        "nand",
        "new",
        "next",
        "nor",
        "not",
        "null",
        "of",
        "on",
        "open",
        "or",
        "others",
        "out",
        "package",
        "port",
        "postponed",
        "procedure",
        "process",
        "pure",
        "range",
        "record",
        "register",
        "reject",
        "rem",
        "report",
        "return",
        "rol",
        "ror",
        "select",
        "severity",
        "shared",
        "signal",
        "sla",
        "sll",
        "sra",
        "srl",
        "subtype",
        "then",
        "to",
        "transport",
        "type",
        "unaffected",
        "units",
        "until",
        "use",
        "variable",
        "wait",
        "when",
        "while",
        "with",
        "xnor",
        "xor",
        // VHDL-2008
        "context",
        "default",
        "force",
        "parameter",
        "protected",
        "release",
    ]
    .into_iter()
    .collect()
});

/// Built-in and commonly-declared VHDL type names.
///
/// There is no symbol table here (full type-aware casing would require
/// elaboration); this fixed table covers std/ieee types.
static VHDL_TYPES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "bit",
        "bit_vector",
        "boolean",
        "boolean_vector",
        "character",
        "delay_length",
        "file_open_kind",
        "file_open_status",
        "integer",
        "integer_vector",
        "line",
        "natural",
        "positive",
        "real",
        "real_vector",
        "severity_level",
        "side",
        "signed",
        "std_logic",
        "std_logic_vector",
        "std_ulogic",
        "std_ulogic_vector",
        "string",
        "text",
        "time",
        "time_vector",
        "unsigned",
        "width",
    ]
    .into_iter()
    .collect()
});

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    TypeName,
    Identifier,
    Operator,
    Delimiter,
    StringLiteral,
    Comment,
    Whitespace,
    Newline,
    EndOfInput,
}

/// A classified slice of source text with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// True for Whitespace and Newline tokens.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Newline)
    }

    /// Case-insensitive comparison against a keyword spelling.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(word)
    }

    /// True for the given delimiter text (`;`, `,`, `(`, ...).
    #[must_use]
    pub fn is_delimiter(&self, text: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.text == text
    }
}

/// Classify a bare word scanned from source text.
///
/// Reserved words are keywords, entries of the built-in type table are type
/// names, everything else is a user identifier. Matching is case-insensitive;
/// the original spelling is preserved for the case normalizer to judge.
#[must_use]
pub fn classify_word(word: &str) -> TokenKind {
    let lowered = word.to_ascii_lowercase();
    if VHDL_KEYWORDS.contains(lowered.as_str()) {
        TokenKind::Keyword
    } else if VHDL_TYPES.contains(lowered.as_str()) {
        TokenKind::TypeName
    } else {
        TokenKind::Identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keyword() {
        assert_eq!(classify_word("signal"), TokenKind::Keyword);
        assert_eq!(classify_word("SIGNAL"), TokenKind::Keyword);
        assert_eq!(classify_word("Entity"), TokenKind::Keyword);
    }

    #[test]
    fn test_classify_type() {
        assert_eq!(classify_word("std_logic"), TokenKind::TypeName);
        assert_eq!(classify_word("STD_LOGIC_VECTOR"), TokenKind::TypeName);
        assert_eq!(classify_word("Integer"), TokenKind::TypeName);
    }

    #[test]
    fn test_classify_identifier() {
        assert_eq!(classify_word("my_signal"), TokenKind::Identifier);
        assert_eq!(classify_word("counter"), TokenKind::Identifier);
    }

    #[test]
    fn test_is_keyword_case_insensitive() {
        let token = Token::new(TokenKind::Keyword, "THEN", 1, 1);
        assert!(token.is_keyword("then"));
        assert!(!token.is_keyword("else"));
    }

    #[test]
    fn test_is_blank() {
        assert!(Token::new(TokenKind::Whitespace, "  ", 1, 1).is_blank());
        assert!(Token::new(TokenKind::Newline, "\n", 1, 3).is_blank());
        assert!(!Token::new(TokenKind::Identifier, "a", 1, 1).is_blank());
    }
}
