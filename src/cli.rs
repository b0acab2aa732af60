//! Command-line interface for vprettier.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Arg, ArgAction, Command};

use crate::config::{AlignMode, AlignScope, Case, NewLinePolicy};

/// CLI arguments parsed from command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Casing of reserved words
    pub keyword_case: Option<Case>,

    /// Casing of built-in type names
    pub type_case: Option<Case>,

    /// Indentation unit (whitespace string)
    pub indentation: Option<String>,

    /// Output line terminator: "lf" or "crlf"
    pub end_of_line: Option<String>,

    /// Line-break policy after `;`
    pub newline_semicolon: Option<NewLinePolicy>,

    /// Line-break policy after `then`
    pub newline_then: Option<NewLinePolicy>,

    /// Line-break policy after `else`
    pub newline_else: Option<NewLinePolicy>,

    /// Operator-class selector for sign alignment
    pub align_scope: Option<AlignScope>,

    /// Region-partitioning strategy for sign alignment
    pub align_mode: Option<AlignMode>,

    /// Extra operator spellings to align (comma separated)
    pub align_keywords: Option<Vec<String>>,

    /// Delete comments
    pub remove_comments: bool,

    /// Delete standalone report statements
    pub remove_reports: bool,

    /// Emit advisory alias warnings
    pub check_alias: bool,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Check mode: report files that would change, modify nothing
    pub check: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("vprettier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Auto-formatter for VHDL source code")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("keyword-case")
                .short('k')
                .long("keyword-case")
                .help("Casing of reserved words: upper, lower, unchanged [default: upper]")
                .value_name("CASE"),
        )
        .arg(
            Arg::new("type-case")
                .short('t')
                .long("type-case")
                .help("Casing of built-in type names: upper, lower, unchanged [default: upper]")
                .value_name("CASE"),
        )
        .arg(
            Arg::new("indentation")
                .short('i')
                .long("indentation")
                .help("Unit of indentation [default: four spaces]")
                .value_name("STR"),
        )
        .arg(
            Arg::new("end-of-line")
                .long("end-of-line")
                .help("Output line terminator: lf or crlf [default: lf]")
                .value_name("EOL"),
        )
        .arg(
            Arg::new("newline-semicolon")
                .long("newline-semicolon")
                .help("Line break after ';': insert, suppress, unchanged [default: insert]")
                .value_name("POLICY"),
        )
        .arg(
            Arg::new("newline-then")
                .long("newline-then")
                .help("Line break after 'then': insert, suppress, unchanged [default: insert]")
                .value_name("POLICY"),
        )
        .arg(
            Arg::new("newline-else")
                .long("newline-else")
                .help("Line break after 'else': insert, suppress, unchanged [default: insert]")
                .value_name("POLICY"),
        )
        .arg(
            Arg::new("align-scope")
                .long("align-scope")
                .help("Sign alignment operator classes: regional, all, disabled [default: disabled]")
                .value_name("SCOPE"),
        )
        .arg(
            Arg::new("align-mode")
                .long("align-mode")
                .help("Sign alignment region strategy: blank, local, global [default: local]")
                .value_name("MODE"),
        )
        .arg(
            Arg::new("align-keywords")
                .long("align-keywords")
                .help("Extra operator spellings to align, comma separated")
                .value_name("LIST"),
        )
        .arg(
            Arg::new("remove-comments")
                .long("remove-comments")
                .help("Delete comments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remove-reports")
                .long("remove-reports")
                .help("Delete standalone report statements")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check-alias")
                .long("check-alias")
                .help("Warn about duplicate and self-referential aliases")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Write to stdout instead of formatting in place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report files that would be reformatted, modify nothing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Explicit config file (disables auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recurse into directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Suppress per-file progress output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0 = auto, 1 = sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Glob pattern of files/directories to skip (repeatable)")
                .value_name("GLOB")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from the process environment.
///
/// Exits the process on parse failure, printing usage.
#[must_use]
pub fn parse_args() -> CliArgs {
    let matches = build_cli().get_matches();
    args_from_matches(&matches).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    })
}

/// Parse CLI arguments from an explicit iterator (used by tests and the
/// directive layer). Returns an error string on invalid input.
pub fn parse_args_from<I, T>(iter: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_cli()
        .try_get_matches_from(iter)
        .map_err(|e| e.to_string())?;
    args_from_matches(&matches)
}

fn parse_enum<T: FromStr<Err = String>>(
    matches: &clap::ArgMatches,
    id: &str,
) -> Result<Option<T>, String> {
    matches
        .get_one::<String>(id)
        .map(|s| T::from_str(s).map_err(|e| format!("--{id}: {e}")))
        .transpose()
}

fn args_from_matches(matches: &clap::ArgMatches) -> Result<CliArgs, String> {
    Ok(CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
        keyword_case: parse_enum(matches, "keyword-case")?,
        type_case: parse_enum(matches, "type-case")?,
        indentation: matches.get_one::<String>("indentation").cloned(),
        end_of_line: matches.get_one::<String>("end-of-line").cloned(),
        newline_semicolon: parse_enum(matches, "newline-semicolon")?,
        newline_then: parse_enum(matches, "newline-then")?,
        newline_else: parse_enum(matches, "newline-else")?,
        align_scope: parse_enum(matches, "align-scope")?,
        align_mode: parse_enum(matches, "align-mode")?,
        align_keywords: matches.get_one::<String>("align-keywords").map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string)
                .collect()
        }),
        remove_comments: matches.get_flag("remove-comments"),
        remove_reports: matches.get_flag("remove-reports"),
        check_alias: matches.get_flag("check-alias"),
        stdout: matches.get_flag("stdout"),
        check: matches.get_flag("check"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
        debug: matches.get_flag("debug"),
    })
}
