//! Output formatting and styling.
//!
//! All user-facing console lines go through [`OutputFormatter`] so the
//! styling stays consistent between the organizer and the CLI.

use colored::*;

/// Prints styled progress and status lines.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message to stderr in red with an X mark.
    ///
    /// ```no_run
    /// use fileorg::output::OutputFormatter;
    /// OutputFormatter::error("Failed to move file");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints an action that a dry run would have performed.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[Dry Run] {}", message).yellow());
    }
}
