//! Advisory checking of alias declarations.
//!
//! Scans `alias <name> [: subtype] is <target>;` declarations and flags
//! duplicate aliases of one target and self-referential aliases. Purely
//! diagnostic: the token stream is never rewritten. Detection is
//! file-scoped — proper scoping would need elaboration, which this engine
//! deliberately does not do.

use std::collections::HashMap;

use crate::error::{AliasWarning, AliasWarningKind};
use crate::parser::token::{Token, TokenKind};

/// Collect warnings for suspicious alias declarations.
#[must_use]
pub fn check_aliases(tokens: &[Token]) -> Vec<AliasWarning> {
    let mut warnings = Vec::new();
    // target (lowercased) -> first alias name
    let mut seen: HashMap<String, String> = HashMap::new();

    let significant: Vec<&Token> = tokens
        .iter()
        .filter(|t| !t.is_blank() && t.kind != TokenKind::Comment)
        .collect();

    let mut i = 0;
    while i < significant.len() {
        if !significant[i].is_keyword("alias") {
            i += 1;
            continue;
        }
        let keyword = significant[i];
        i += 1;

        let Some(name_token) = significant.get(i) else {
            break;
        };
        if name_token.kind != TokenKind::Identifier {
            continue;
        }
        let name = name_token.text.clone();
        i += 1;

        // skip optional subtype indication up to `is`
        while i < significant.len()
            && !significant[i].is_keyword("is")
            && !significant[i].is_delimiter(";")
        {
            i += 1;
        }
        if i >= significant.len() || !significant[i].is_keyword("is") {
            continue;
        }
        i += 1;

        // the aliased target runs to the terminating `;`
        let mut target = String::new();
        while i < significant.len() && !significant[i].is_delimiter(";") {
            target.push_str(&significant[i].text);
            i += 1;
        }
        if target.is_empty() {
            continue;
        }

        let target_key = target.to_ascii_lowercase();
        if name.eq_ignore_ascii_case(&target) {
            warnings.push(AliasWarning {
                kind: AliasWarningKind::SelfReferential,
                name,
                target,
                line: keyword.line,
                column: keyword.column,
            });
        } else if seen.contains_key(&target_key) {
            warnings.push(AliasWarning {
                kind: AliasWarningKind::DuplicateAlias,
                name,
                target,
                line: keyword.line,
                column: keyword.column,
            });
        } else {
            seen.insert(target_key, name);
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scanner::tokenize;

    fn check(input: &str) -> Vec<AliasWarning> {
        check_aliases(&tokenize(input).unwrap())
    }

    #[test]
    fn test_clean_alias() {
        assert!(check("alias half : bit_vector is word;").is_empty());
    }

    #[test]
    fn test_duplicate_alias() {
        let warnings = check("alias a is word;\nalias b is word;");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, AliasWarningKind::DuplicateAlias);
        assert_eq!(warnings[0].name, "b");
        assert_eq!(warnings[0].line, 2);
    }

    #[test]
    fn test_duplicate_detection_is_case_insensitive() {
        let warnings = check("alias a is Word;\nalias b is WORD;");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_self_referential_alias() {
        let warnings = check("alias sig is sig;");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, AliasWarningKind::SelfReferential);
    }

    #[test]
    fn test_sliced_targets_are_distinct() {
        let warnings = check(
            "alias hi is word(7 downto 4);\nalias lo is word(3 downto 0);",
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_same_slice_is_duplicate() {
        let warnings = check(
            "alias hi is word(7 downto 4);\nalias hi2 is word(7 downto 4);",
        );
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_alias_keyword_in_comment_ignored() {
        assert!(check("-- alias a is word;\nx <= y;").is_empty());
    }
}
