//! Command-line interface for fileorg.
//!
//! Parses arguments with clap, merges them with the optional settings file,
//! runs the organizer and prints the summary.

use crate::config::{ConfigError, Configuration, FilterConfig};
use crate::file_organizer::{self, OrganizeError};
use crate::output::OutputFormatter;
use crate::report::RunResult;
use crate::strategy::Strategy;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Organize the files of a directory into subfolders.
#[derive(Debug, Parser)]
#[command(name = "fileorg", version, about, long_about = None)]
pub struct Cli {
    /// Directory whose files should be organized
    pub directory: PathBuf,

    /// Criteria for sorting files [default: extension]
    #[arg(long, value_enum, value_name = "CRITERIA")]
    pub by: Option<Strategy>,

    /// Perform a trial run with no changes made
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print per-file details and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file to read instead of the default locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Errors that end a CLI run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Organize(#[from] OrganizeError),
}

impl Cli {
    /// Builds the run configuration from the arguments and the settings file.
    ///
    /// `--by` wins over the settings file's `by`, which wins over the
    /// extension strategy.
    pub fn configuration(&self) -> Result<Configuration, ConfigError> {
        let settings = FilterConfig::load(self.config.as_deref())?;
        let strategy = self.by.or(settings.by).unwrap_or_default();
        let filters = settings.compile()?;

        Ok(Configuration::new(&self.directory, strategy)
            .with_dry_run(self.dry_run)
            .with_verbose(self.verbose)
            .with_filters(filters))
    }
}

/// Runs one organizing pass and prints its summary.
///
/// Recoverable folder and move failures are part of the returned
/// [`RunResult`]; only settings and scan failures are errors here.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use fileorg::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["fileorg", "--dry-run", "--by", "size", "/path/to/downloads"]);
/// match run_cli(&cli) {
///     Ok(result) => println!("{} files moved", result.files_moved),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunResult, CliError> {
    let config = cli.configuration()?;

    if config.dry_run {
        OutputFormatter::warning("Dry run mode enabled. No changes will be made.");
    }
    OutputFormatter::info(&format!(
        "Organizing contents of: {} (by {})",
        config.source_dir.display(),
        config.strategy
    ));

    let result = file_organizer::organize(&config)?;

    OutputFormatter::header("SUMMARY");
    print!("{}", result.summarize());
    if result.is_clean() {
        OutputFormatter::success("Organization complete.");
    } else {
        OutputFormatter::warning("Some files could not be organized. Please review errors above.");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["fileorg", "/tmp/downloads"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("/tmp/downloads"));
        assert_eq!(cli.by, None);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_short_and_long_flags() {
        let short = Cli::try_parse_from(["fileorg", "-n", "-v", "dir"]).unwrap();
        assert!(short.dry_run);
        assert!(short.verbose);

        let long = Cli::try_parse_from(["fileorg", "--dry-run", "--verbose", "--by", "date", "dir"])
            .unwrap();
        assert!(long.dry_run);
        assert!(long.verbose);
        assert_eq!(long.by, Some(Strategy::Date));
    }

    #[test]
    fn test_parse_rejects_invalid_strategy() {
        let err = Cli::try_parse_from(["fileorg", "--by", "color", "dir"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_parse_requires_directory() {
        let err = Cli::try_parse_from(["fileorg", "--dry-run"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_by_flag_overrides_settings_file() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let settings = temp_dir.path().join("settings.toml");
        std::fs::write(&settings, "by = \"date\"\n").unwrap();
        let settings = settings.to_string_lossy().to_string();

        let from_file =
            Cli::try_parse_from(["fileorg", "--config", settings.as_str(), "dir"]).unwrap();
        assert_eq!(from_file.configuration().unwrap().strategy, Strategy::Date);

        let from_flag = Cli::try_parse_from([
            "fileorg",
            "--config",
            settings.as_str(),
            "--by",
            "size",
            "dir",
        ])
        .unwrap();
        assert_eq!(from_flag.configuration().unwrap().strategy, Strategy::Size);
    }
}
