//! Scope tracking for VHDL block constructs.
//!
//! [`BlockKind`] classifies the keywords that open indentation blocks; the
//! indenter keeps a stack of them and pops on `end`.

pub mod types;

pub use types::{is_continuation_keyword, BlockKind};
