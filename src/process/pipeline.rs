//! The formatting pipeline.
//!
//! Runs the passes in a fixed order over the token stream:
//! tokenize → strip comments/reports → alias check → case conversion →
//! newline policy → line grouping → indentation → sign alignment → render.
//!
//! The first fatal error short-circuits the run; no partial output is
//! produced. Identical input text and configuration always yield identical
//! output. The pipeline is pure text-in/text-out; all I/O lives in the CLI
//! layer, with [`format_file`] as the bridge.

use std::io::{BufRead, Write};

use anyhow::Context;

use crate::config::Config;
use crate::error::{AliasWarning, FormatError};
use crate::format::{
    align_signs, apply_newline_policy, assign_depths, check_aliases, convert_case,
    strip_comments, strip_reports, CaseSettings,
};
use crate::parser::lines::{group_lines, Line};
use crate::parser::scanner::tokenize;
use crate::parser::token::TokenKind;

/// Successful output text plus any advisory alias warnings.
#[derive(Debug, Clone)]
pub struct Formatted {
    pub text: String,
    pub warnings: Vec<AliasWarning>,
}

/// Beautify VHDL source text under the given configuration.
pub fn beautify(input: &str, config: &Config) -> Result<Formatted, FormatError> {
    let mut tokens = tokenize(input)?;

    if config.remove_comments {
        tokens = strip_comments(&tokens);
    }
    if config.remove_reports {
        tokens = strip_reports(&tokens)?;
    }

    let warnings = if config.check_alias {
        check_aliases(&tokens)
    } else {
        Vec::new()
    };

    convert_case(&mut tokens, CaseSettings::from_config(config));
    let tokens = apply_newline_policy(&tokens, config);

    let mut lines = group_lines(tokens);
    assign_depths(&mut lines)?;
    align_signs(&mut lines, config);

    Ok(Formatted {
        text: render(&lines, config),
        warnings,
    })
}

/// Flatten the line view into output text.
///
/// Each line renders as `depth × indent_unit` plus its token texts, trailing
/// blanks trimmed; lines join with the configured end-of-line.
fn render(lines: &[Line], config: &Config) -> String {
    let rendered: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.tokens.iter().all(|t| t.kind == TokenKind::Whitespace) {
                return String::new();
            }
            let mut text = config.indent_unit.repeat(line.depth);
            for token in &line.tokens {
                text.push_str(&token.text);
            }
            text.truncate(text.trim_end_matches([' ', '\t']).len());
            text
        })
        .collect();
    rendered.join(&config.end_of_line)
}

/// Format a buffered reader into a writer — the CLI-facing wrapper around
/// [`beautify`]. Returns the alias warnings for the caller to report.
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
) -> crate::error::Result<Vec<AliasWarning>> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read input")?;
    let formatted = beautify(&text, config)?;
    output
        .write_all(formatted.text.as_bytes())
        .context("failed to write output")?;
    Ok(formatted.warnings)
}
