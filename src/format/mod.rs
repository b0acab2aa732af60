//! VHDL formatting passes.
//!
//! This module contains the core formatting logic organized into submodules:
//! - [`stripper`]: Removes comments and `report` statements when requested
//! - [`alias_check`]: Flags duplicate and self-referential alias declarations
//! - [`case_convert`]: Converts case of keywords and built-in type names
//! - [`newline`]: Applies the per-boundary line-break policy (`;`/`then`/`else`)
//! - [`indenter`]: Assigns indentation depth from block nesting
//! - [`aligner`]: Pads assignment/association operators to a common column

pub mod aligner;
pub mod alias_check;
pub mod case_convert;
pub mod indenter;
pub mod newline;
pub mod stripper;

pub use aligner::align_signs;
pub use alias_check::check_aliases;
pub use case_convert::{convert_case, CaseSettings};
pub use indenter::{assign_depths, VhdlIndenter};
pub use newline::apply_newline_policy;
pub use stripper::{strip_comments, strip_reports};
