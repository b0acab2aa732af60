//! Configuration management for vprettier.
//!
//! This module provides the [`Config`] struct which controls all formatting
//! behavior. Configuration can be loaded from:
//! - TOML files (`vprettier.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`-- vprettier: --keyword-case lower`)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being formatted up to the filesystem root, plus the user's home
//! directory.
//!
//! All stylistic choices are closed enumerations; an invalid option string is
//! rejected eagerly rather than silently defaulted.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["vprettier.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Casing applied to a token class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Upper,
    Lower,
    Unchanged,
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" => Ok(Case::Upper),
            "lower" => Ok(Case::Lower),
            "unchanged" => Ok(Case::Unchanged),
            other => Err(format!(
                "invalid case '{other}' (expected upper, lower or unchanged)"
            )),
        }
    }
}

/// Whether a line break follows a boundary token (`;`, `then`, `else`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLinePolicy {
    /// Force a break after the token.
    Insert,
    /// Force the next statement onto the same line.
    Suppress,
    /// Leave the break exactly as found in the source.
    Unchanged,
}

impl FromStr for NewLinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(NewLinePolicy::Insert),
            "suppress" => Ok(NewLinePolicy::Suppress),
            "unchanged" => Ok(NewLinePolicy::Unchanged),
            other => Err(format!(
                "invalid newline policy '{other}' (expected insert, suppress or unchanged)"
            )),
        }
    }
}

/// Which operator classes qualify for sign alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignScope {
    /// Only the configured keyword list (built-in classes when empty).
    Regional,
    /// Every recognized alignable operator, each class independently.
    All,
    /// Alignment pass skipped.
    Disabled,
}

impl FromStr for AlignScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regional" => Ok(AlignScope::Regional),
            "all" => Ok(AlignScope::All),
            "disabled" => Ok(AlignScope::Disabled),
            other => Err(format!(
                "invalid align scope '{other}' (expected regional, all or disabled)"
            )),
        }
    }
}

/// How alignment regions are partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Regions break on blank lines only; depth changes are ignored.
    Blank,
    /// Regions break on blank lines and on indentation-depth changes.
    Local,
    /// One region spanning the whole file.
    Global,
}

impl FromStr for AlignMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blank" => Ok(AlignMode::Blank),
            "local" => Ok(AlignMode::Local),
            "global" => Ok(AlignMode::Global),
            other => Err(format!(
                "invalid align mode '{other}' (expected blank, local or global)"
            )),
        }
    }
}

// Serde default functions
fn default_case() -> Case {
    Case::Upper
}
fn default_indent_unit() -> String {
    "    ".to_string()
}
fn default_newline() -> NewLinePolicy {
    NewLinePolicy::Insert
}
fn default_align_scope() -> AlignScope {
    AlignScope::Disabled
}
fn default_align_mode() -> AlignMode {
    AlignMode::Local
}
fn default_end_of_line() -> String {
    "\n".to_string()
}

/// Main configuration struct for vprettier.
///
/// Constructed once per run and read-only thereafter; no pass mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Casing of reserved words (default: upper)
    #[serde(default = "default_case")]
    pub keyword_case: Case,

    /// Casing of built-in type names (default: upper)
    #[serde(default = "default_case")]
    pub type_case: Case,

    /// Unit of indentation, one block level (default: four spaces)
    #[serde(default = "default_indent_unit")]
    pub indent_unit: String,

    /// Line-break policy after `;`
    #[serde(default = "default_newline")]
    pub newline_semicolon: NewLinePolicy,

    /// Line-break policy after `then`
    #[serde(default = "default_newline")]
    pub newline_then: NewLinePolicy,

    /// Line-break policy after `else`
    #[serde(default = "default_newline")]
    pub newline_else: NewLinePolicy,

    /// Operator-class selector for sign alignment (default: disabled)
    #[serde(default = "default_align_scope")]
    pub align_scope: AlignScope,

    /// Region-partitioning strategy for sign alignment (default: local)
    #[serde(default = "default_align_mode")]
    pub align_mode: AlignMode,

    /// Extra operator spellings to align (e.g. `":"`)
    #[serde(default)]
    pub align_keywords: Vec<String>,

    /// Delete comments (default: false)
    #[serde(default)]
    pub remove_comments: bool,

    /// Delete standalone `report ... ;` statements (default: false)
    #[serde(default)]
    pub remove_reports: bool,

    /// Emit advisory warnings for duplicate/self-referential aliases
    #[serde(default)]
    pub check_alias: bool,

    /// Line terminator used in the output (default: `\n`)
    #[serde(default = "default_end_of_line")]
    pub end_of_line: String,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub keyword_case: Option<Case>,
    pub type_case: Option<Case>,
    pub indent_unit: Option<String>,
    pub newline_semicolon: Option<NewLinePolicy>,
    pub newline_then: Option<NewLinePolicy>,
    pub newline_else: Option<NewLinePolicy>,
    pub align_scope: Option<AlignScope>,
    pub align_mode: Option<AlignMode>,
    pub align_keywords: Option<Vec<String>>,
    pub remove_comments: Option<bool>,
    pub remove_reports: Option<bool>,
    pub check_alias: Option<bool>,
    pub end_of_line: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keyword_case: Case::Upper,
            type_case: Case::Upper,
            indent_unit: "    ".to_string(),
            newline_semicolon: NewLinePolicy::Insert,
            newline_then: NewLinePolicy::Insert,
            newline_else: NewLinePolicy::Insert,
            align_scope: AlignScope::Disabled,
            align_mode: AlignMode::Local,
            align_keywords: Vec::new(),
            remove_comments: false,
            remove_reports: false,
            check_alias: false,
            end_of_line: "\n".to_string(),
        }
    }
}

impl Config {
    /// Maximum reasonable indent unit length
    const MAX_INDENT_UNIT: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent_unit.is_empty() {
            return Some("indent_unit must not be empty".to_string());
        }
        if self.indent_unit.len() > Self::MAX_INDENT_UNIT {
            return Some(format!(
                "indent_unit length {} exceeds maximum of {}",
                self.indent_unit.len(),
                Self::MAX_INDENT_UNIT
            ));
        }
        if !self.indent_unit.chars().all(|c| c == ' ' || c == '\t') {
            return Some("indent_unit may contain only spaces and tabs".to_string());
        }
        if self.end_of_line != "\n" && self.end_of_line != "\r\n" {
            return Some(format!(
                "end_of_line {:?} is not a recognized line terminator",
                self.end_of_line
            ));
        }
        if self.align_keywords.iter().any(String::is_empty) {
            return Some("align_keywords must not contain empty strings".to_string());
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.keyword_case {
            self.keyword_case = v;
        }
        if let Some(v) = partial.type_case {
            self.type_case = v;
        }
        if let Some(v) = &partial.indent_unit {
            self.indent_unit.clone_from(v);
        }
        if let Some(v) = partial.newline_semicolon {
            self.newline_semicolon = v;
        }
        if let Some(v) = partial.newline_then {
            self.newline_then = v;
        }
        if let Some(v) = partial.newline_else {
            self.newline_else = v;
        }
        if let Some(v) = partial.align_scope {
            self.align_scope = v;
        }
        if let Some(v) = partial.align_mode {
            self.align_mode = v;
        }
        if let Some(v) = &partial.align_keywords {
            self.align_keywords.clone_from(v);
        }
        if let Some(v) = partial.remove_comments {
            self.remove_comments = v;
        }
        if let Some(v) = partial.remove_reports {
            self.remove_reports = v;
        }
        if let Some(v) = partial.check_alias {
            self.check_alias = v;
        }
        if let Some(v) = &partial.end_of_line {
            self.end_of_line.clone_from(v);
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns list of config file paths in order of
    /// priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
