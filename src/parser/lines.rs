//! Line view of the token stream.
//!
//! After the token-level passes have run, the orchestrator groups the stream
//! into [`Line`]s — the ordered tokens between two Newline markers — and the
//! remaining passes (indentation, sign alignment) operate on that view. The
//! view is owned exclusively by the orchestrator for the duration of one
//! formatting run.

use crate::parser::token::{Token, TokenKind};

/// One physical output line: its tokens (Newline markers excluded) plus the
/// indentation depth assigned by the indenter.
#[derive(Debug, Clone)]
pub struct Line {
    pub tokens: Vec<Token>,
    /// Block-nesting depth; rendered as `depth × indent_unit`.
    pub depth: usize,
}

impl Line {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, depth: 0 }
    }

    /// Tokens that are neither whitespace nor comments.
    pub fn code_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| !t.is_blank() && t.kind != TokenKind::Comment)
    }

    /// First code token, if the line has any.
    #[must_use]
    pub fn first_code_token(&self) -> Option<&Token> {
        self.code_tokens().next()
    }

    /// True when the line carries no code and no comment.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(Token::is_blank)
    }
}

/// Split a token stream into lines at Newline markers.
///
/// Newline and EndOfInput tokens are consumed by the split; a trailing
/// Newline yields a final empty line so rendering can restore the trailing
/// break.
#[must_use]
pub fn group_lines(tokens: Vec<Token>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Newline => {
                lines.push(Line::new(std::mem::take(&mut current)));
            }
            TokenKind::EndOfInput => {}
            _ => current.push(token),
        }
    }
    lines.push(Line::new(current));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scanner::tokenize;

    #[test]
    fn test_group_two_lines() {
        let lines = group_lines(tokenize("a <= b;\nc <= d;").unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].first_code_token().unwrap().text, "a");
        assert_eq!(lines[1].first_code_token().unwrap().text, "c");
    }

    #[test]
    fn test_trailing_newline_keeps_empty_line() {
        let lines = group_lines(tokenize("a <= b;\n").unwrap());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].is_blank());
    }

    #[test]
    fn test_blank_line_detection() {
        let lines = group_lines(tokenize("a;\n   \nb;").unwrap());
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].is_blank());
        assert!(lines[1].is_blank());
        assert!(!lines[2].is_blank());
    }

    #[test]
    fn test_code_tokens_skip_comments() {
        let lines = group_lines(tokenize("a <= b; -- note").unwrap());
        let code: Vec<_> = lines[0].code_tokens().map(|t| t.text.as_str()).collect();
        assert_eq!(code, vec!["a", "<=", "b", ";"]);
    }
}
