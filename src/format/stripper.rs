//! Removal of comments and `report` statements from the token stream.
//!
//! Both strips run before the line view is derived, so a comment-only or
//! report-only line vanishes entirely — its Newline goes with it, leaving no
//! blank residue.

use crate::error::FormatError;
use crate::parser::token::{Token, TokenKind};

/// Keywords/delimiters that can directly precede a statement, used to tell a
/// standalone `report` statement from the report clause of an `assert`.
const STATEMENT_STARTERS: &[&str] = &["begin", "then", "else", "loop", "is", "generate"];

/// Delete every Comment token.
///
/// Trailing whitespace before a removed comment goes with it; a comment that
/// sat alone on its line takes the line's Newline too. A block comment
/// embedded between code tokens leaves a single space so its neighbors do
/// not fuse.
#[must_use]
pub fn strip_comments(tokens: &[Token]) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].kind != TokenKind::Comment {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        }

        let (line, column) = (tokens[i].line, tokens[i].column);
        while out
            .last()
            .is_some_and(|t| t.kind == TokenKind::Whitespace)
        {
            out.pop();
        }
        let at_line_start = out.last().map_or(true, |t| t.kind == TokenKind::Newline);
        i += 1;
        while i < tokens.len() && tokens[i].kind == TokenKind::Whitespace {
            i += 1;
        }

        if at_line_start {
            if i < tokens.len() && tokens[i].kind == TokenKind::Newline {
                i += 1;
            }
        } else if i < tokens.len()
            && !matches!(tokens[i].kind, TokenKind::Newline | TokenKind::EndOfInput)
        {
            // comment sat between code tokens, keep them separated
            out.push(Token::new(TokenKind::Whitespace, " ", line, column));
        }
    }
    out
}

/// Delete standalone `report ... ;` statements, severity clause included.
///
/// A `report` clause inside an `assert` statement stays; removing it would
/// orphan the assert. A report with no terminating `;` is an
/// [`FormatError::UnterminatedReport`] rather than a partial deletion.
pub fn strip_reports(tokens: &[Token]) -> Result<Vec<Token>, FormatError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        if token.is_keyword("report") && at_statement_start(&out) {
            let (line, column) = (token.line, token.column);

            // consume through the terminating semicolon
            let mut j = i;
            loop {
                if j >= tokens.len() || tokens[j].kind == TokenKind::EndOfInput {
                    return Err(FormatError::UnterminatedReport { line, column });
                }
                if tokens[j].is_delimiter(";") {
                    j += 1;
                    break;
                }
                j += 1;
            }

            while out
                .last()
                .is_some_and(|t| t.kind == TokenKind::Whitespace)
            {
                out.pop();
            }
            let at_line_start = out.last().map_or(true, |t| t.kind == TokenKind::Newline);
            i = j;
            while i < tokens.len() && tokens[i].kind == TokenKind::Whitespace {
                i += 1;
            }
            if at_line_start {
                if i < tokens.len() && tokens[i].kind == TokenKind::Newline {
                    i += 1;
                }
            } else if i < tokens.len()
                && !matches!(tokens[i].kind, TokenKind::Newline | TokenKind::EndOfInput)
            {
                out.push(Token::new(TokenKind::Whitespace, " ", line, column));
            }
        } else {
            out.push(token.clone());
            i += 1;
        }
    }
    Ok(out)
}

/// True when the next code token would begin a statement.
fn at_statement_start(out: &[Token]) -> bool {
    match out.iter().rev().find(|t| !t.is_blank() && t.kind != TokenKind::Comment) {
        None => true,
        Some(prev) => {
            prev.is_delimiter(";")
                || prev.kind == TokenKind::Operator && prev.text == "=>"
                || STATEMENT_STARTERS.iter().any(|w| prev.is_keyword(w))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scanner::tokenize;

    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .filter(|t| t.kind != TokenKind::EndOfInput)
            .map(|t| t.text.as_str())
            .collect()
    }

    #[test]
    fn test_strip_comment_only_line_leaves_no_blank() {
        let tokens = tokenize("-- comment\nx := 1;").unwrap();
        assert_eq!(render(&strip_comments(&tokens)), "x := 1;");
    }

    #[test]
    fn test_strip_trailing_comment() {
        let tokens = tokenize("x := 1; -- set x\ny := 2;").unwrap();
        assert_eq!(render(&strip_comments(&tokens)), "x := 1;\ny := 2;");
    }

    #[test]
    fn test_strip_indented_comment_line() {
        let tokens = tokenize("a <= b;\n    -- note\nc <= d;").unwrap();
        assert_eq!(render(&strip_comments(&tokens)), "a <= b;\nc <= d;");
    }

    #[test]
    fn test_strip_block_comment_between_code() {
        let tokens = tokenize("a /* mid */ <= b;").unwrap();
        assert_eq!(render(&strip_comments(&tokens)), "a <= b;");
    }

    #[test]
    fn test_strip_standalone_report() {
        let tokens = tokenize("x := 1;\nreport \"boom\" severity error;\ny := 2;").unwrap();
        assert_eq!(render(&strip_reports(&tokens).unwrap()), "x := 1;\ny := 2;");
    }

    #[test]
    fn test_strip_report_without_severity() {
        let tokens = tokenize("report \"note\";\nx := 1;").unwrap();
        assert_eq!(render(&strip_reports(&tokens).unwrap()), "x := 1;");
    }

    #[test]
    fn test_assert_report_clause_is_kept() {
        let source = "assert a = b report \"mismatch\" severity error;";
        let tokens = tokenize(source).unwrap();
        assert_eq!(render(&strip_reports(&tokens).unwrap()), source);
    }

    #[test]
    fn test_report_mid_line_after_semicolon() {
        let tokens = tokenize("x := 1; report \"boom\"; y := 2;").unwrap();
        assert_eq!(render(&strip_reports(&tokens).unwrap()), "x := 1; y := 2;");
    }

    #[test]
    fn test_unterminated_report() {
        let tokens = tokenize("report \"no terminator\"").unwrap();
        let err = strip_reports(&tokens).unwrap_err();
        assert!(matches!(err, FormatError::UnterminatedReport { line: 1, .. }));
    }

    #[test]
    fn test_report_in_case_arm() {
        let tokens = tokenize("when others => report \"bad state\";").unwrap();
        assert_eq!(render(&strip_reports(&tokens).unwrap()), "when others =>");
    }
}
