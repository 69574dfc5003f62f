//! Run configuration and the optional settings file.
//!
//! A run is described by a [`Configuration`]: the directory to organize, the
//! strategy, and the dry-run and verbose switches. Defaults for the strategy
//! and a set of exclusion rules can be supplied in a TOML settings file:
//!
//! ```toml
//! by = "date"
//!
//! [exclude]
//! filenames = ["Thumbs.db", "desktop.ini"]
//! extensions = ["part", "crdownload"]
//! patterns = ["*.tmp"]
//! regex = ["^~\\$"]
//! ```
//!
//! The settings file is only ever read.

use crate::strategy::Strategy;
use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the settings file looked up in the current directory.
pub const LOCAL_SETTINGS_FILE: &str = ".fileorg.toml";

/// Errors that can occur while loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file not found at an explicitly given path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    /// Invalid glob pattern.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern { pattern: String, reason: String },
    /// Invalid regex pattern.
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },
    /// IO error while reading the settings file.
    #[error("IO error reading configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything one organizing run needs. Immutable once built.
#[derive(Debug)]
pub struct Configuration {
    /// Directory whose files are organized.
    pub source_dir: PathBuf,
    /// How files are grouped.
    pub strategy: Strategy,
    /// Report intended actions without touching the filesystem.
    pub dry_run: bool,
    /// Print per-file details.
    pub verbose: bool,
    /// Compiled exclusion rules applied during the scan.
    pub filters: CompiledFilters,
}

impl Configuration {
    /// Creates a configuration with no exclusion rules.
    pub fn new(source_dir: impl Into<PathBuf>, strategy: Strategy) -> Self {
        Self {
            source_dir: source_dir.into(),
            strategy,
            dry_run: false,
            verbose: false,
            filters: CompiledFilters::empty(),
        }
    }

    /// Enables or disables simulate-only mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables verbose output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replaces the exclusion rules.
    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Contents of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Default strategy when `--by` is not given.
    #[serde(default)]
    pub by: Option<Strategy>,

    /// Rules for leaving files where they are.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the file name (e.g., "*.tmp").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// File extensions to exclude, compared case-insensitively.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl FilterConfig {
    /// Load the settings file, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given
    /// 2. `.fileorg.toml` in the current directory
    /// 3. `~/.config/fileorg/config.toml`
    /// 4. built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file found cannot be read or parsed, or if
    /// `config_path` is given and does not exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_SETTINGS_FILE);
        if local_config.is_file() {
            return Self::load_from_file(&local_config);
        }

        if let Some(home) = std::env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("fileorg")
                .join("config.toml");
            if home_config.is_file() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load settings from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile the exclusion rules for matching.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob pattern is invalid.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.exclude)
    }
}

/// Exclusion rules with every pattern compiled up front.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    /// Filters that exclude nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    fn new(rules: ExcludeRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| ConfigError::InvalidGlobPattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_filenames: rules.filenames.into_iter().collect(),
            exclude_extensions: rules
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Returns true if the file at `file_path` should be organized.
    ///
    /// Only the file name is matched; the source directory plays no part.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some((_, ext)) = file_name.rsplit_once('.')
            && self.exclude_extensions.contains(&ext.to_lowercase())
        {
            return false;
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&file_name))
        {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
    }
}
