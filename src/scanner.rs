//! Directory scanning.
//!
//! Reads one level of a directory and turns every regular, visible,
//! non-excluded entry into a [`FileRecord`]. Everything else is counted as
//! skipped on the run's [`RunResult`].

use crate::config::CompiledFilters;
use crate::file_organizer::{OrganizeError, OrganizeResult};
use crate::report::RunResult;
use chrono::{DateTime, FixedOffset, Local};
use log::debug;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

/// Snapshot of a regular file taken at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// The file name, without any directory component. Lossy for names that
    /// are not valid UTF-8; moves use the name in `path`.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Full path of the file inside the source directory.
    pub path: PathBuf,
    /// Last-modified time, in the local offset it was read in.
    pub modified: DateTime<FixedOffset>,
    /// Lowercase extension without the leading dot; empty if there is none.
    pub extension: String,
}

/// Why an entry was left out of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    Hidden,
    Excluded,
}

impl SkipReason {
    fn describe(&self) -> &'static str {
        match self {
            SkipReason::Directory => "directory",
            SkipReason::Hidden => "hidden",
            SkipReason::Excluded => "excluded by filter",
        }
    }
}

/// Lists the immediate entries of `dir` and builds a record for each file.
///
/// Directories, hidden entries (leading `.`) and entries rejected by
/// `filters` are skipped and counted in `result.files_skipped`.
///
/// # Errors
///
/// Returns [`OrganizeError::Scan`] if the directory cannot be listed or the
/// metadata of any entry cannot be read. No partial list is returned.
pub fn scan(
    dir: &Path,
    filters: &CompiledFilters,
    result: &mut RunResult,
) -> OrganizeResult<Vec<FileRecord>> {
    let entries = fs::read_dir(dir).map_err(|e| OrganizeError::Scan {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OrganizeError::Scan {
            path: dir.to_path_buf(),
            source: e,
        })?;

        match inspect_entry(&entry, filters)? {
            Ok(record) => files.push(record),
            Err(reason) => {
                debug!(
                    "skipping {} ({})",
                    entry.path().display(),
                    reason.describe()
                );
                result.files_skipped += 1;
            }
        }
    }

    debug!("scanned {}: {} file(s)", dir.display(), files.len());
    Ok(files)
}

/// Builds a record for one entry, or says why it is skipped.
fn inspect_entry(
    entry: &DirEntry,
    filters: &CompiledFilters,
) -> OrganizeResult<Result<FileRecord, SkipReason>> {
    let path = entry.path();
    let metadata = entry.metadata().map_err(|e| OrganizeError::Scan {
        path: path.clone(),
        source: e,
    })?;

    if metadata.is_dir() {
        return Ok(Err(SkipReason::Directory));
    }

    let name = entry.file_name().to_string_lossy().to_string();
    if is_hidden(&name) {
        return Ok(Err(SkipReason::Hidden));
    }
    if !filters.should_include(&path) {
        return Ok(Err(SkipReason::Excluded));
    }

    let modified = metadata.modified().map_err(|e| OrganizeError::Scan {
        path: path.clone(),
        source: e,
    })?;

    Ok(Ok(FileRecord {
        extension: extension_of(&name),
        size: metadata.len(),
        modified: DateTime::<Local>::from(modified).fixed_offset(),
        path,
        name,
    }))
}

/// Returns true for names starting with a dot.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Returns the lowercase text after the last `.` in `name`, or an empty
/// string when there is no dot.
///
/// ```
/// use fileorg::scanner::extension_of;
///
/// assert_eq!(extension_of("Report.PDF"), "pdf");
/// assert_eq!(extension_of("archive.tar.gz"), "gz");
/// assert_eq!(extension_of("Makefile"), "");
/// ```
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}
