//! Left-to-right scanner producing classified VHDL tokens.
//!
//! The scanner recognizes the VHDL lexical classes: line comments (`--`),
//! block comments (`/* ... */`, VHDL-2008), string literals with doubled-quote
//! escapes, character literals (disambiguated from tick attributes), based
//! literals (`16#ff#`), extended identifiers (`\bus\`) and multi-character
//! operators. Keyword casing is not judged here; raw text is preserved for the
//! case normalizer.
//!
//! Whitespace runs are preserved as single Whitespace tokens so later passes
//! can replace them without losing "was there a space" information.

use crate::error::FormatError;
use crate::parser::token::{classify_word, Token, TokenKind};

/// Multi-character operators, longest first so `**` wins over `*`.
const MULTI_CHAR_OPERATORS: &[&str] = &["**", ":=", "<=", ">=", "=>", "/=", "<>"];

const SINGLE_CHAR_OPERATORS: &[char] = &['=', '<', '>', '+', '-', '*', '/', '&'];

const DELIMITERS: &[char] = &['(', ')', ';', ',', '.', ':', '|', '[', ']'];

/// Convert raw VHDL text into an ordered token sequence.
///
/// The sequence always ends with a single `EndOfInput` token. Fails with
/// [`FormatError::UnterminatedLiteral`] or [`FormatError::InvalidCharacter`]
/// when the scan cannot classify a token.
pub fn tokenize(text: &str) -> Result<Vec<Token>, FormatError> {
    Scanner::new(text).run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consume one character, tracking line/column.
    fn bump(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn push(&mut self, kind: TokenKind, text: String, line: usize, column: usize) {
        self.tokens.push(Token {
            kind,
            text,
            line,
            column,
        });
    }

    fn run(mut self) -> Result<Vec<Token>, FormatError> {
        while let Some(c) = self.peek(0) {
            let (line, column) = (self.line, self.column);

            if c == '\n' || c == '\r' {
                self.scan_newline(line, column);
            } else if c == ' ' || c == '\t' {
                self.scan_whitespace(line, column);
            } else if c == '-' && self.peek(1) == Some('-') {
                self.scan_line_comment(line, column);
            } else if c == '/' && self.peek(1) == Some('*') {
                self.scan_block_comment(line, column)?;
            } else if c == '"' {
                self.scan_string(line, column)?;
            } else if c == '\\' {
                self.scan_extended_identifier(line, column)?;
            } else if c == '\'' {
                self.scan_tick(line, column);
            } else if c.is_ascii_digit() {
                self.scan_number(line, column)?;
            } else if c.is_alphabetic() {
                self.scan_word(line, column);
            } else if let Some(op) = self.match_multi_char_operator() {
                for _ in 0..op.len() {
                    self.bump();
                }
                self.push(TokenKind::Operator, op.to_string(), line, column);
            } else if SINGLE_CHAR_OPERATORS.contains(&c) {
                self.bump();
                self.push(TokenKind::Operator, c.to_string(), line, column);
            } else if DELIMITERS.contains(&c) {
                self.bump();
                self.push(TokenKind::Delimiter, c.to_string(), line, column);
            } else {
                return Err(FormatError::InvalidCharacter {
                    found: c,
                    line,
                    column,
                });
            }
        }

        let (line, column) = (self.line, self.column);
        self.push(TokenKind::EndOfInput, String::new(), line, column);
        Ok(self.tokens)
    }

    fn match_multi_char_operator(&self) -> Option<&'static str> {
        MULTI_CHAR_OPERATORS.iter().copied().find(|op| {
            op.chars()
                .enumerate()
                .all(|(i, expected)| self.peek(i) == Some(expected))
        })
    }

    fn scan_newline(&mut self, line: usize, column: usize) {
        let mut text = String::new();
        if self.peek(0) == Some('\r') {
            text.push(self.bump());
        }
        if self.peek(0) == Some('\n') {
            text.push(self.bump());
        }
        self.push(TokenKind::Newline, text, line, column);
    }

    fn scan_whitespace(&mut self, line: usize, column: usize) {
        let mut text = String::new();
        while matches!(self.peek(0), Some(' ' | '\t')) {
            text.push(self.bump());
        }
        self.push(TokenKind::Whitespace, text, line, column);
    }

    fn scan_line_comment(&mut self, line: usize, column: usize) {
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            if c == '\n' || c == '\r' {
                break;
            }
            text.push(self.bump());
        }
        self.push(TokenKind::Comment, text, line, column);
    }

    fn scan_block_comment(&mut self, line: usize, column: usize) -> Result<(), FormatError> {
        let mut text = String::new();
        text.push(self.bump()); // '/'
        text.push(self.bump()); // '*'
        loop {
            match self.peek(0) {
                Some('*') if self.peek(1) == Some('/') => {
                    text.push(self.bump());
                    text.push(self.bump());
                    self.push(TokenKind::Comment, text, line, column);
                    return Ok(());
                }
                Some(_) => {
                    text.push(self.bump());
                }
                None => return Err(FormatError::UnterminatedLiteral { line, column }),
            }
        }
    }

    fn scan_string(&mut self, line: usize, column: usize) -> Result<(), FormatError> {
        let mut text = String::new();
        text.push(self.bump()); // opening quote
        loop {
            match self.peek(0) {
                Some('"') if self.peek(1) == Some('"') => {
                    // doubled quote stays inside the literal
                    text.push(self.bump());
                    text.push(self.bump());
                }
                Some('"') => {
                    text.push(self.bump());
                    self.push(TokenKind::StringLiteral, text, line, column);
                    return Ok(());
                }
                Some('\n' | '\r') | None => {
                    return Err(FormatError::UnterminatedLiteral { line, column })
                }
                Some(_) => {
                    text.push(self.bump());
                }
            }
        }
    }

    fn scan_extended_identifier(&mut self, line: usize, column: usize) -> Result<(), FormatError> {
        let mut text = String::new();
        text.push(self.bump()); // opening backslash
        loop {
            match self.peek(0) {
                Some('\\') if self.peek(1) == Some('\\') => {
                    text.push(self.bump());
                    text.push(self.bump());
                }
                Some('\\') => {
                    text.push(self.bump());
                    self.push(TokenKind::Identifier, text, line, column);
                    return Ok(());
                }
                Some('\n' | '\r') | None => {
                    return Err(FormatError::UnterminatedLiteral { line, column })
                }
                Some(_) => {
                    text.push(self.bump());
                }
            }
        }
    }

    /// Disambiguate character literals from tick attributes.
    ///
    /// `'x'` is a character literal unless the tick directly follows an
    /// identifier, type name, string, or closing bracket, in which case it is
    /// the attribute/qualified-expression tick (`clk'event`, `t'('1')`).
    fn scan_tick(&mut self, line: usize, column: usize) {
        let char_literal = self.peek(2) == Some('\'') && !self.previous_ends_name();
        if char_literal {
            let mut text = String::new();
            text.push(self.bump());
            text.push(self.bump());
            text.push(self.bump());
            self.push(TokenKind::StringLiteral, text, line, column);
        } else {
            self.bump();
            self.push(TokenKind::Delimiter, "'".to_string(), line, column);
        }
    }

    /// True when the last significant token could end a name prefix.
    fn previous_ends_name(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|t| !t.is_blank())
            .is_some_and(|t| {
                matches!(
                    t.kind,
                    TokenKind::Identifier | TokenKind::TypeName | TokenKind::StringLiteral
                ) || t.is_delimiter(")")
                    || t.is_delimiter("]")
            })
    }

    /// Abstract literals: integers, reals, exponents, and based literals.
    ///
    /// Numbers carry Identifier kind; the pipeline has no numeric semantics
    /// and the case passes never touch digit sequences.
    fn scan_number(&mut self, line: usize, column: usize) -> Result<(), FormatError> {
        let mut text = String::new();
        while matches!(self.peek(0), Some(c) if c.is_ascii_digit() || c == '_') {
            text.push(self.bump());
        }

        if self.peek(0) == Some('#') {
            // based literal: base # digits [. digits] # [exponent]
            text.push(self.bump());
            loop {
                match self.peek(0) {
                    Some('#') => {
                        text.push(self.bump());
                        break;
                    }
                    Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '.' => {
                        text.push(self.bump());
                    }
                    _ => return Err(FormatError::UnterminatedLiteral { line, column }),
                }
            }
        } else if self.peek(0) == Some('.')
            && matches!(self.peek(1), Some(c) if c.is_ascii_digit())
        {
            text.push(self.bump());
            while matches!(self.peek(0), Some(c) if c.is_ascii_digit() || c == '_') {
                text.push(self.bump());
            }
        }

        if matches!(self.peek(0), Some('e' | 'E')) {
            let digit_at = match self.peek(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if matches!(self.peek(digit_at), Some(c) if c.is_ascii_digit()) {
                text.push(self.bump());
                if matches!(self.peek(0), Some('+' | '-')) {
                    text.push(self.bump());
                }
                while matches!(self.peek(0), Some(c) if c.is_ascii_digit() || c == '_') {
                    text.push(self.bump());
                }
            }
        }

        self.push(TokenKind::Identifier, text, line, column);
        Ok(())
    }

    fn scan_word(&mut self, line: usize, column: usize) {
        let mut text = String::new();
        while matches!(self.peek(0), Some(c) if c.is_alphanumeric() || c == '_') {
            text.push(self.bump());
        }
        let kind = classify_word(&text);
        self.push(kind, text, line, column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_blank() && t.kind != TokenKind::EndOfInput)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            texts("signal a : std_logic;"),
            vec!["signal", "a", ":", "std_logic", ";"]
        );
    }

    #[test]
    fn test_kind_classification() {
        let tokens = tokenize("signal a : std_logic;").unwrap();
        let code: Vec<_> = tokens.iter().filter(|t| !t.is_blank()).collect();
        assert_eq!(code[0].kind, TokenKind::Keyword);
        assert_eq!(code[1].kind, TokenKind::Identifier);
        assert_eq!(code[2].kind, TokenKind::Delimiter);
        assert_eq!(code[3].kind, TokenKind::TypeName);
        assert_eq!(code[4].kind, TokenKind::Delimiter);
    }

    #[test]
    fn test_whitespace_run_is_single_token() {
        let tokens = tokenize("a    b").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].text, "    ");
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(texts("a <= b; x := 2 ** 3; y /= z;")[1], "<=");
        assert_eq!(texts("x := 1;")[1], ":=");
        assert_eq!(texts("2 ** 3")[1], "**");
        assert_eq!(texts("a => b")[1], "=>");
    }

    #[test]
    fn test_line_comment() {
        let tokens = tokenize("a <= b; -- assign\n").unwrap();
        let comment = tokens.iter().find(|t| t.kind == TokenKind::Comment).unwrap();
        assert_eq!(comment.text, "-- assign");
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let tokens = tokenize("/* one\ntwo */ a").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "/* one\ntwo */");
    }

    #[test]
    fn test_string_with_doubled_quote() {
        let tokens = tokenize(r#"x <= "ab""cd";"#).unwrap();
        let s = tokens
            .iter()
            .find(|t| t.kind == TokenKind::StringLiteral)
            .unwrap();
        assert_eq!(s.text, r#""ab""cd""#);
    }

    #[test]
    fn test_semicolon_inside_string_is_not_a_delimiter() {
        let tokens = tokenize(r#"x <= "a;b";"#).unwrap();
        let semis: Vec<_> = tokens.iter().filter(|t| t.is_delimiter(";")).collect();
        assert_eq!(semis.len(), 1);
    }

    #[test]
    fn test_character_literal() {
        let tokens = tokenize("x <= '1';").unwrap();
        let lit = tokens
            .iter()
            .find(|t| t.kind == TokenKind::StringLiteral)
            .unwrap();
        assert_eq!(lit.text, "'1'");
    }

    #[test]
    fn test_tick_attribute_after_identifier() {
        let tokens = tokenize("clk'event").unwrap();
        assert!(tokens.iter().any(|t| t.is_delimiter("'")));
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::StringLiteral));
    }

    #[test]
    fn test_based_literal() {
        assert_eq!(texts("x := 16#ff#;")[2], "16#ff#");
        assert_eq!(texts("y := 2#1010_0101#;")[2], "2#1010_0101#");
    }

    #[test]
    fn test_extended_identifier() {
        let tokens = tokenize(r"signal \bus\ : bit;").unwrap();
        let id = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Identifier)
            .unwrap();
        assert_eq!(id.text, r"\bus\");
    }

    #[test]
    fn test_position_tracking() {
        let tokens = tokenize("a <= b;\nc <= d;").unwrap();
        let c = tokens.iter().find(|t| t.text == "c").unwrap();
        assert_eq!((c.line, c.column), (2, 1));
        let d = tokens.iter().find(|t| t.text == "d").unwrap();
        assert_eq!((d.line, d.column), (2, 6));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x := \"unterminated").unwrap_err();
        assert!(matches!(err, FormatError::UnterminatedLiteral { .. }));
        assert_eq!(err.position(), (1, 6));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("/* no close").unwrap_err();
        assert!(matches!(err, FormatError::UnterminatedLiteral { .. }));
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("a $ b").unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidCharacter { found: '$', .. }
        ));
    }

    #[test]
    fn test_ends_with_end_of_input() {
        let tokens = tokenize("a").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);
        assert!(kinds("").contains(&TokenKind::EndOfInput));
    }

    #[test]
    fn test_crlf_newline_token() {
        let tokens = tokenize("a;\r\nb;").unwrap();
        let nl = tokens.iter().find(|t| t.kind == TokenKind::Newline).unwrap();
        assert_eq!(nl.text, "\r\n");
    }
}
