//! Error types and result aliases for vprettier.
//!
//! This module defines the error handling infrastructure:
//! - [`FormatError`]: fatal formatting failures with source position
//! - [`AliasWarning`]: advisory findings attached to a successful run
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by the CLI layer

use std::fmt;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// Fatal formatting failure.
///
/// Any of these aborts the run with no output produced; half-formatted VHDL
/// could be mistaken for valid output. Each variant carries the 1-based
/// line/column of the first inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A string, character, based or extended-identifier literal (or a block
    /// comment) was opened but never closed.
    #[error("unterminated literal at line {line}, column {column}")]
    UnterminatedLiteral { line: usize, column: usize },

    /// A character that belongs to no VHDL lexical class.
    #[error("invalid character {found:?} at line {line}, column {column}")]
    InvalidCharacter {
        found: char,
        line: usize,
        column: usize,
    },

    /// More `end`s than open blocks.
    #[error("unbalanced block: unmatched 'end' at line {line}, column {column}")]
    UnbalancedBlock { line: usize, column: usize },

    /// A `report` statement with no terminating `;`.
    #[error("unterminated report statement at line {line}, column {column}")]
    UnterminatedReport { line: usize, column: usize },
}

impl FormatError {
    /// Source position of the failure (1-based line, column).
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        match *self {
            FormatError::UnterminatedLiteral { line, column }
            | FormatError::InvalidCharacter { line, column, .. }
            | FormatError::UnbalancedBlock { line, column }
            | FormatError::UnterminatedReport { line, column } => (line, column),
        }
    }
}

/// Category of an alias finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasWarningKind {
    /// The same target is aliased more than once.
    DuplicateAlias,
    /// An alias names itself as its target.
    SelfReferential,
}

/// Advisory finding from the alias checker.
///
/// Never blocks output; attached to the successful result as metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasWarning {
    pub kind: AliasWarningKind,
    /// The alias designator as written.
    pub name: String,
    /// The aliased target as written.
    pub target: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for AliasWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AliasWarningKind::DuplicateAlias => write!(
                f,
                "line {}: alias '{}' duplicates an earlier alias of '{}'",
                self.line, self.name, self.target
            ),
            AliasWarningKind::SelfReferential => write!(
                f,
                "line {}: alias '{}' refers to itself",
                self.line, self.name
            ),
        }
    }
}
