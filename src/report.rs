//! Per-run accounting and the final summary.
use crate::file_organizer::OrganizeError;
use std::fmt::Write;

/// Counts of what a run did, plus every recoverable error it hit.
///
/// One value is owned by each run and passed by `&mut` to the scanner and
/// the move executor.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Category folders created.
    pub folders_created: usize,
    /// Files renamed into a category folder.
    pub files_moved: usize,
    /// Directories, hidden entries and excluded files left in place.
    pub files_skipped: usize,
    /// Folder creation and move failures, in the order they happened.
    pub errors: Vec<OrganizeError>,
}

impl RunResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a recoverable error.
    pub fn record_error(&mut self, error: OrganizeError) {
        self.errors.push(error);
    }

    /// Returns true if no errors were collected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Formats the human-readable summary printed at the end of a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileorg::report::RunResult;
    ///
    /// let result = RunResult { files_moved: 2, ..Default::default() };
    /// let summary = result.summarize();
    /// assert!(summary.contains("Files Moved: 2"));
    /// assert!(summary.ends_with("No errors encountered.\n"));
    /// ```
    pub fn summarize(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Organization Summary:");
        let _ = writeln!(out, "Folders Created: {}", self.folders_created);
        let _ = writeln!(out, "Files Moved: {}", self.files_moved);
        let _ = writeln!(out, "Files Skipped: {}", self.files_skipped);
        let _ = writeln!(out, "Errors: {}", self.errors.len());

        if self.errors.is_empty() {
            let _ = writeln!(out, "No errors encountered.");
        } else {
            let _ = writeln!(out, "Errors encountered during organization:");
            for error in &self.errors {
                let _ = writeln!(out, "- {}", error);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn move_error() -> OrganizeError {
        OrganizeError::FileMove {
            from: PathBuf::from("/data/a.txt"),
            to: PathBuf::from("/data/txt/a.txt"),
            source: std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            ),
        }
    }

    #[test]
    fn test_summary_without_errors() {
        let result = RunResult {
            folders_created: 1,
            files_moved: 2,
            files_skipped: 3,
            errors: Vec::new(),
        };

        let summary = result.summarize();
        assert!(summary.starts_with("Organization Summary:\n"));
        assert!(summary.contains("Folders Created: 1\n"));
        assert!(summary.contains("Files Moved: 2\n"));
        assert!(summary.contains("Files Skipped: 3\n"));
        assert!(summary.contains("No errors encountered."));
        assert!(result.is_clean());
    }

    #[test]
    fn test_summary_lists_errors() {
        let mut result = RunResult::new();
        result.record_error(move_error());

        let summary = result.summarize();
        assert!(summary.contains("Errors encountered during organization:"));
        assert!(summary.contains("- Failed to move /data/a.txt to /data/txt/a.txt"));
        assert!(!summary.contains("No errors encountered."));
        assert!(!result.is_clean());
    }
}
