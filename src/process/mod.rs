//! Formatting orchestration.
//!
//! The pipeline runs the passes in a fixed order over the token stream and
//! assembles the final text, or surfaces a structured failure:
//!
//! 1. Tokenize the raw text
//! 2. Strip comments and/or `report` statements (when configured)
//! 3. Collect alias warnings (when configured)
//! 4. Normalize keyword/type casing
//! 5. Apply the newline policy to boundary tokens
//! 6. Derive the Line view, assign indentation depths
//! 7. Align signs within each region
//! 8. Render with the configured indent unit and end-of-line
//!
//! The main entry points are [`beautify`] for text-to-text formatting and
//! [`format_file`] for the reader/writer bridge used by the CLI.

pub mod pipeline;

pub use pipeline::{beautify, format_file, Formatted};
