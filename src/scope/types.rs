//! Block constructs of VHDL that drive indentation.

use std::fmt;

/// VHDL block-opening constructs.
///
/// Each opener adds one indentation level; `end` pops the innermost one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Entity,
    Architecture,
    Package,
    Configuration,
    Context,
    Component,
    Process,
    Block,
    If,
    Case,
    Loop,
    Record,
    Units,
    Protected,
    Generate,
    Subprogram,
    /// Block configuration inside a configuration declaration
    /// (`for rtl ... end for;`).
    ForBlock,
}

impl BlockKind {
    /// Design-unit level constructs, recognized only as the first code token
    /// of a line. That rule keeps direct instantiation
    /// (`u1: entity work.foo port map (...)`) from opening a block.
    #[must_use]
    pub fn from_leading_keyword(word: &str) -> Option<Self> {
        match word {
            "entity" => Some(BlockKind::Entity),
            "architecture" => Some(BlockKind::Architecture),
            "package" => Some(BlockKind::Package),
            "configuration" => Some(BlockKind::Configuration),
            "context" => Some(BlockKind::Context),
            "component" => Some(BlockKind::Component),
            _ => None,
        }
    }

    /// Constructs recognized anywhere in a line; most carry a leading label
    /// (`p1: process`, `g1: for i in ... generate`).
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "process" => Some(BlockKind::Process),
            "block" => Some(BlockKind::Block),
            "if" => Some(BlockKind::If),
            "case" => Some(BlockKind::Case),
            "loop" => Some(BlockKind::Loop),
            "record" => Some(BlockKind::Record),
            "units" => Some(BlockKind::Units),
            "protected" => Some(BlockKind::Protected),
            "generate" => Some(BlockKind::Generate),
            _ => None,
        }
    }

    /// Subprogram bodies open a block only when their header carries `is` on
    /// the same line; pure declarations end in `;` and never contain `is`.
    #[must_use]
    pub fn from_subprogram_keyword(word: &str, line_has_is: bool) -> Option<Self> {
        match word {
            "function" | "procedure" if line_has_is => Some(BlockKind::Subprogram),
            _ => None,
        }
    }

    /// A leading `for` opens a block configuration (`for rtl`) unless the
    /// line is a loop/generate header or a complete `for ... use ...;`
    /// configuration specification.
    #[must_use]
    pub fn from_for_keyword(is_loop_or_generate: bool, ends_with_semicolon: bool) -> Option<Self> {
        if is_loop_or_generate || ends_with_semicolon {
            None
        } else {
            Some(BlockKind::ForBlock)
        }
    }
}

/// Keywords rendered at the parent depth without changing the block stack:
/// `begin` closes a declarative region, `else`/`elsif` continue an `if`.
#[must_use]
pub fn is_continuation_keyword(word: &str) -> bool {
    matches!(word, "begin" | "else" | "elsif")
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Entity => "ENTITY",
            BlockKind::Architecture => "ARCHITECTURE",
            BlockKind::Package => "PACKAGE",
            BlockKind::Configuration => "CONFIGURATION",
            BlockKind::Context => "CONTEXT",
            BlockKind::Component => "COMPONENT",
            BlockKind::Process => "PROCESS",
            BlockKind::Block => "BLOCK",
            BlockKind::If => "IF",
            BlockKind::Case => "CASE",
            BlockKind::Loop => "LOOP",
            BlockKind::Record => "RECORD",
            BlockKind::Units => "UNITS",
            BlockKind::Protected => "PROTECTED",
            BlockKind::Generate => "GENERATE",
            BlockKind::Subprogram => "SUBPROGRAM",
            BlockKind::ForBlock => "FOR",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_keywords() {
        assert_eq!(
            BlockKind::from_leading_keyword("entity"),
            Some(BlockKind::Entity)
        );
        assert_eq!(BlockKind::from_leading_keyword("process"), None);
    }

    #[test]
    fn test_anywhere_keywords() {
        assert_eq!(BlockKind::from_keyword("process"), Some(BlockKind::Process));
        assert_eq!(BlockKind::from_keyword("generate"), Some(BlockKind::Generate));
        assert_eq!(BlockKind::from_keyword("entity"), None);
    }

    #[test]
    fn test_subprogram_requires_is() {
        assert_eq!(
            BlockKind::from_subprogram_keyword("function", true),
            Some(BlockKind::Subprogram)
        );
        assert_eq!(BlockKind::from_subprogram_keyword("function", false), None);
        assert_eq!(BlockKind::from_subprogram_keyword("signal", true), None);
    }

    #[test]
    fn test_for_keyword_rules() {
        // block configuration header
        assert_eq!(
            BlockKind::from_for_keyword(false, false),
            Some(BlockKind::ForBlock)
        );
        // loop/generate headers open via their own keyword
        assert_eq!(BlockKind::from_for_keyword(true, false), None);
        // complete `for ... use ...;` configuration specification
        assert_eq!(BlockKind::from_for_keyword(false, true), None);
    }

    #[test]
    fn test_continuation_keywords() {
        assert!(is_continuation_keyword("begin"));
        assert!(is_continuation_keyword("elsif"));
        assert!(!is_continuation_keyword("end"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", BlockKind::If), "IF");
        assert_eq!(format!("{}", BlockKind::Architecture), "ARCHITECTURE");
    }
}
