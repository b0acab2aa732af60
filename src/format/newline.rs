//! Newline policy for boundary tokens.
//!
//! For each boundary token (`;`, `then`, `else`) the configured
//! [`NewLinePolicy`] decides whether a line break follows:
//! - `Insert` guarantees a Newline token immediately follows, collapsing any
//!   trailing whitespace first. A trailing comment stays attached to its line;
//!   the break lands after it.
//! - `Suppress` removes the break and joins with a single space. It never
//!   joins across a comment, which would comment out the joined code.
//! - `Unchanged` leaves the break/no-break as tokenized.
//!
//! Policy application operates only on Delimiter/Keyword-kind tokens; a `;`
//! inside a string literal or comment was never tokenized as a delimiter, so
//! literal contents are naturally exempt.

use crate::config::{Config, NewLinePolicy};
use crate::parser::token::{Token, TokenKind};

fn policy_for(token: &Token, config: &Config) -> Option<NewLinePolicy> {
    if token.is_delimiter(";") {
        Some(config.newline_semicolon)
    } else if token.is_keyword("then") {
        Some(config.newline_then)
    } else if token.is_keyword("else") {
        Some(config.newline_else)
    } else {
        None
    }
}

/// Apply the configured newline policies to a token stream.
#[must_use]
pub fn apply_newline_policy(tokens: &[Token], config: &Config) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let policy = policy_for(token, config);
        out.push(token.clone());
        i += 1;

        match policy {
            Some(NewLinePolicy::Insert) => i = insert_break(tokens, i, &mut out),
            Some(NewLinePolicy::Suppress) => i = suppress_break(tokens, i, &mut out),
            Some(NewLinePolicy::Unchanged) | None => {}
        }
    }
    out
}

/// Guarantee a Newline right after position `i`, keeping a trailing comment
/// on the line. Returns the position to resume scanning from.
fn insert_break(tokens: &[Token], i: usize, out: &mut Vec<Token>) -> usize {
    let boundary = out.last().expect("boundary was just pushed").clone();
    let mut j = i;

    while j < tokens.len() && tokens[j].kind == TokenKind::Whitespace {
        j += 1;
    }
    if j < tokens.len() && tokens[j].kind == TokenKind::Comment {
        out.push(Token::new(
            TokenKind::Whitespace,
            " ",
            tokens[j].line,
            tokens[j].column,
        ));
        out.push(tokens[j].clone());
        j += 1;
        while j < tokens.len() && tokens[j].kind == TokenKind::Whitespace {
            j += 1;
        }
    }

    if j < tokens.len() && tokens[j].kind == TokenKind::Newline {
        out.push(tokens[j].clone());
        j + 1
    } else {
        out.push(Token::new(
            TokenKind::Newline,
            "\n",
            boundary.line,
            boundary.column,
        ));
        j
    }
}

/// Remove any break after position `i`, joining with a single space.
/// Leaves everything as found when a comment or end of input intervenes.
fn suppress_break(tokens: &[Token], i: usize, out: &mut Vec<Token>) -> usize {
    let mut j = i;
    let mut saw_newline = false;

    while j < tokens.len() && tokens[j].is_blank() {
        if tokens[j].kind == TokenKind::Newline {
            saw_newline = true;
        }
        j += 1;
    }
    if !saw_newline {
        return i;
    }
    if j >= tokens.len()
        || matches!(tokens[j].kind, TokenKind::Comment | TokenKind::EndOfInput)
    {
        return i;
    }

    out.push(Token::new(
        TokenKind::Whitespace,
        " ",
        tokens[j].line,
        tokens[j].column,
    ));
    j
}
