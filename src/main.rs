//! vprettier - Auto-formatter for VHDL source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use rayon::prelude::*;
use vprettier::process::beautify;
use vprettier::{find_directive, parse_args, CliArgs, Config, Result};
use walkdir::WalkDir;

/// VHDL file extensions to process
const VHDL_EXTENSIONS: &[&str] = &["vhd", "vhdl", "vho", "VHD", "VHDL", "VHO"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        vprettier::build_cli().print_help()?;
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // With an explicit config file one config serves all inputs; otherwise
    // each file discovers its own from its ancestor directories.
    let base_config = if args.config.is_none() {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No VHDL files found to format.");
        }
        return Ok(());
    }

    let failures = AtomicUsize::new(0);
    let changed = AtomicUsize::new(0);

    let run = |file: &PathBuf| {
        if let Err(e) = process_file(file, base_config.as_ref(), &args, &changed) {
            failures.fetch_add(1, Ordering::Relaxed);
            eprintln!("-- [ERROR]: could not format \"{}\": {e}", file.display());
        }
    };

    // Sequential processing for stdout mode keeps output ordered
    if args.stdout || args.jobs == Some(1) {
        files.iter().for_each(run);
    } else {
        files.par_iter().for_each(run);
    }

    if !args.silent {
        eprintln!(
            "{} file(s) processed, {} changed, {} failed",
            files.len(),
            changed.load(Ordering::Relaxed),
            failures.load(Ordering::Relaxed)
        );
    }

    let failed = failures.load(Ordering::Relaxed);
    let would_change = args.check && changed.load(Ordering::Relaxed) > 0;
    if failed > 0 || would_change {
        std::process::exit(1);
    }
    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        let start = for_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(v) = args.keyword_case {
        config.keyword_case = v;
    }
    if let Some(v) = args.type_case {
        config.type_case = v;
    }
    if let Some(v) = &args.indentation {
        config.indent_unit.clone_from(v);
    }
    if let Some(v) = &args.end_of_line {
        config.end_of_line = match v.as_str() {
            "lf" => "\n".to_string(),
            "crlf" => "\r\n".to_string(),
            other => anyhow::bail!("invalid --end-of-line '{other}' (expected lf or crlf)"),
        };
    }
    if let Some(v) = args.newline_semicolon {
        config.newline_semicolon = v;
    }
    if let Some(v) = args.newline_then {
        config.newline_then = v;
    }
    if let Some(v) = args.newline_else {
        config.newline_else = v;
    }
    if let Some(v) = args.align_scope {
        config.align_scope = v;
    }
    if let Some(v) = args.align_mode {
        config.align_mode = v;
    }
    if let Some(v) = &args.align_keywords {
        config.align_keywords.clone_from(v);
    }
    if args.remove_comments {
        config.remove_comments = true;
    }
    if args.remove_reports {
        config.remove_reports = true;
    }
    if args.check_alias {
        config.check_alias = true;
    }

    if let Some(msg) = config.validate() {
        anyhow::bail!("invalid configuration: {msg}");
    }
    Ok(config)
}

/// Apply in-file directive overrides on top of a base config.
///
/// Returns None when the directive disables formatting for the file.
fn apply_directive(config: &Config, text: &str) -> Option<Config> {
    let Some(overrides) = find_directive(text) else {
        return Some(config.clone());
    };
    if overrides.off {
        return None;
    }
    let mut config = config.clone();
    if let Some(n) = overrides.indent {
        config.indent_unit = " ".repeat(n);
    }
    if let Some(case) = overrides.keyword_case {
        config.keyword_case = case;
    }
    if let Some(case) = overrides.type_case {
        config.type_case = case;
    }
    Some(config)
}

fn is_vhdl_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| VHDL_EXTENSIONS.contains(&ext))
}

fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    let text = path.to_string_lossy();
    patterns.iter().any(|p| p.matches(&text))
}

/// Collect all VHDL files named by the CLI inputs.
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("Warning: invalid exclude pattern '{p}': {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();
    for input in &args.inputs {
        if input.is_file() {
            // explicitly named files bypass the extension filter
            if !is_excluded(input, &patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            let max_depth = if args.recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(input)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if entry.file_type().is_file()
                    && is_vhdl_file(path)
                    && !is_excluded(path, &patterns)
                {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            eprintln!("Warning: input not found: {}", input.display());
        }
    }
    files.sort();
    files.dedup();
    files
}

fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;

    let Some(config) = apply_directive(config, &text) else {
        print!("{text}");
        return Ok(());
    };

    let formatted = beautify(&text, &config)?;
    report_warnings("<stdin>", &formatted.warnings, args);
    io::stdout().write_all(formatted.text.as_bytes())?;
    Ok(())
}

fn process_file(
    path: &Path,
    base_config: Option<&Config>,
    args: &CliArgs,
    changed: &AtomicUsize,
) -> Result<()> {
    let size = fs::metadata(path)?.len();
    if size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!("file exceeds {DEFAULT_MAX_FILE_SIZE} bytes, skipping");
    }

    let text = fs::read_to_string(path)?;

    let config = match base_config {
        Some(config) => config.clone(),
        None => build_config(args, Some(path))?,
    };
    let Some(config) = apply_directive(&config, &text) else {
        if args.debug {
            eprintln!("[DEBUG] formatting disabled by directive: {}", path.display());
        }
        return Ok(());
    };

    let formatted = beautify(&text, &config)?;
    report_warnings(&path.display().to_string(), &formatted.warnings, args);

    if args.stdout {
        io::stdout().write_all(formatted.text.as_bytes())?;
        return Ok(());
    }

    if formatted.text == text {
        return Ok(());
    }
    changed.fetch_add(1, Ordering::Relaxed);

    if args.check {
        println!("would reformat: {}", path.display());
        return Ok(());
    }

    fs::write(path, formatted.text.as_bytes())?;
    if !args.silent {
        eprintln!("-- [INFO]: formatted \"{}\"", path.display());
    }
    Ok(())
}

fn report_warnings(name: &str, warnings: &[vprettier::AliasWarning], args: &CliArgs) {
    if args.silent {
        return;
    }
    for warning in warnings {
        eprintln!("-- [WARNING]: {name}: {warning}");
    }
}
