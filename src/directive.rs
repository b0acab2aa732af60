//! Inline directive parsing for `-- vprettier:` comments.
//!
//! Supports in-file configuration overrides via special comments:
//! `-- vprettier: --keyword-case lower --indent 2`
//!
//! The single word `off` disables formatting for the whole file.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Case;

/// Pattern to match vprettier directives
static VPRETTIER_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*--\s*vprettier:\s*(.*?)\s*$").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone)]
pub struct DirectiveOverrides {
    /// Skip the file entirely
    pub off: bool,
    /// Indent unit as a number of spaces
    pub indent: Option<usize>,
    pub keyword_case: Option<Case>,
    pub type_case: Option<Case>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.off
            && self.indent.is_none()
            && self.keyword_case.is_none()
            && self.type_case.is_none()
    }
}

/// Check if a line contains a vprettier directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    VPRETTIER_DIRECTIVE_RE.is_match(line)
}

/// Parse a vprettier directive line and return option overrides
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a valid, non-empty directive
/// * `None` otherwise
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = VPRETTIER_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();
    parse_directive_args(args_str)
}

fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let tokens: Vec<&str> = args_str.split_whitespace().collect();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            "off" => {
                overrides.off = true;
            }
            "-i" | "--indent" => {
                i += 1;
                if i < tokens.len() {
                    overrides.indent = tokens[i].parse().ok();
                }
            }
            "--keyword-case" => {
                i += 1;
                if i < tokens.len() {
                    overrides.keyword_case = Case::from_str(tokens[i]).ok();
                }
            }
            "--type-case" => {
                i += 1;
                if i < tokens.len() {
                    overrides.type_case = Case::from_str(tokens[i]).ok();
                }
            }
            _ => {
                // Unknown option, skip
            }
        }
        i += 1;
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan input for vprettier directives and return the first found
///
/// Only the first directive is used (subsequent ones are ignored).
#[must_use]
pub fn find_directive(text: &str) -> Option<DirectiveOverrides> {
    text.lines().find_map(parse_directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directive_line() {
        assert!(is_directive_line("-- vprettier: --indent 2"));
        assert!(is_directive_line("  --vprettier: off"));
        assert!(is_directive_line("-- VPRETTIER: --keyword-case lower"));
        assert!(!is_directive_line("-- this is a regular comment"));
        assert!(!is_directive_line("x := 1;"));
    }

    #[test]
    fn test_parse_directive_indent() {
        let overrides = parse_directive("-- vprettier: --indent 2").unwrap();
        assert_eq!(overrides.indent, Some(2));
    }

    #[test]
    fn test_parse_directive_cases() {
        let overrides =
            parse_directive("-- vprettier: --keyword-case lower --type-case upper").unwrap();
        assert_eq!(overrides.keyword_case, Some(Case::Lower));
        assert_eq!(overrides.type_case, Some(Case::Upper));
    }

    #[test]
    fn test_parse_directive_off() {
        let overrides = parse_directive("-- vprettier: off").unwrap();
        assert!(overrides.off);
    }

    #[test]
    fn test_parse_invalid_directive() {
        assert!(parse_directive("-- vprettier:").is_none());
        assert!(parse_directive("-- vprettier: --unknown").is_none());
    }

    #[test]
    fn test_find_directive_takes_first() {
        let text = "-- header\n-- vprettier: --indent 3\n-- vprettier: --indent 8\n";
        let overrides = find_directive(text).unwrap();
        assert_eq!(overrides.indent, Some(3));
    }

    #[test]
    fn test_find_directive_none() {
        assert!(find_directive("entity e is\nend e;\n").is_none());
    }
}
