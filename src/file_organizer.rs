//! File organization: grouping, collision-free destinations and moves.
//!
//! This module turns scanned files into category buckets and relocates them
//! into `source_dir/<category>/`, creating folders as needed. Failures on
//! individual folders or files are collected on the run's [`RunResult`] and
//! never stop the run.

use crate::config::Configuration;
use crate::output::OutputFormatter;
use crate::report::RunResult;
use crate::scanner::{self, FileRecord};
use crate::strategy::Categorizer;
use log::{debug, info};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Highest numeric suffix tried when looking for a free destination name.
pub const MAX_COLLISION_SUFFIX: u32 = 10_000;

/// Files grouped by category, iterated in category order.
pub type BucketMap = BTreeMap<String, Vec<FileRecord>>;

/// Errors that can occur while organizing a directory.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The source directory or one of its entries could not be read.
    #[error("Failed to read directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A category directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    FolderCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file could not be moved into its category directory.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    FileMove {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// Every suffixed name up to [`MAX_COLLISION_SUFFIX`] is taken.
    #[error(
        "No free name for {file_name} in {} after {} attempts",
        .folder.display(),
        MAX_COLLISION_SUFFIX
    )]
    CollisionLimit { folder: PathBuf, file_name: String },
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Runs the whole pipeline for one configuration: scan, group, move.
///
/// # Errors
///
/// Only a scan failure is fatal. Folder and move failures are collected in
/// the returned [`RunResult`].
///
/// # Examples
///
/// ```no_run
/// use fileorg::config::Configuration;
/// use fileorg::file_organizer::organize;
/// use fileorg::strategy::Strategy;
///
/// let config = Configuration::new("/path/to/downloads", Strategy::Extension).with_dry_run(true);
/// let result = organize(&config).expect("scan failed");
/// print!("{}", result.summarize());
/// ```
pub fn organize(config: &Configuration) -> OrganizeResult<RunResult> {
    let mut result = RunResult::new();

    let files = scanner::scan(&config.source_dir, &config.filters, &mut result)?;
    info!(
        "found {} file(s) in {}, grouping by {}",
        files.len(),
        config.source_dir.display(),
        config.strategy
    );

    let buckets = group(files, &config.strategy);
    if config.verbose {
        describe_buckets(&buckets);
    }

    FileOrganizer::execute(buckets, config, &mut result);
    Ok(result)
}

/// Partitions files into buckets keyed by the category `strategy` assigns.
///
/// Files keep their input order within a bucket.
pub fn group(files: Vec<FileRecord>, strategy: &dyn Categorizer) -> BucketMap {
    let mut buckets = BucketMap::new();
    for file in files {
        let category = strategy.categorize(&file);
        buckets.entry(category).or_default().push(file);
    }
    buckets
}

fn describe_buckets(buckets: &BucketMap) {
    OutputFormatter::header("Categories");
    for (category, files) in buckets {
        let file_word = if files.len() == 1 { "file" } else { "files" };
        OutputFormatter::info(&format!("{}/ ({} {})", category, files.len(), file_word));
        for file in files {
            OutputFormatter::plain(&format!("  - {} ({} bytes)", file.name, file.size));
        }
    }
    println!();
}

/// Moves files into category directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Returns a path inside `target_folder` where `file_name` can be placed
    /// without overwriting anything.
    ///
    /// If `target_folder/file_name` is taken, `stem_1.ext`, `stem_2.ext`, …
    /// are tried in order. The filesystem is only probed, never modified.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::CollisionLimit`] once the suffix passes
    /// [`MAX_COLLISION_SUFFIX`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fileorg::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// // With "txt/a.txt" already present this yields "txt/a_1.txt".
    /// let dest = FileOrganizer::resolve_destination(Path::new("/data/txt"), "a.txt").unwrap();
    /// ```
    pub fn resolve_destination(
        target_folder: &Path,
        file_name: impl AsRef<OsStr>,
    ) -> OrganizeResult<PathBuf> {
        let file_name = file_name.as_ref();
        let candidate = target_folder.join(file_name);
        if is_free(&candidate) {
            return Ok(candidate);
        }

        for counter in 1..=MAX_COLLISION_SUFFIX {
            let candidate = target_folder.join(suffixed_name(file_name, counter));
            if is_free(&candidate) {
                debug!(
                    "{} exists in {}, using {}",
                    file_name.to_string_lossy(),
                    target_folder.display(),
                    candidate.display()
                );
                return Ok(candidate);
            }
        }

        Err(OrganizeError::CollisionLimit {
            folder: target_folder.to_path_buf(),
            file_name: file_name.to_string_lossy().to_string(),
        })
    }

    /// Creates category folders and moves every bucket's files into them.
    ///
    /// In dry-run mode the intended actions are printed and nothing on disk
    /// changes. Otherwise each successful folder creation and move is counted
    /// on `result`; failures are recorded there and processing continues.
    /// A bucket whose folder cannot be created is left in place.
    pub fn execute(buckets: BucketMap, config: &Configuration, result: &mut RunResult) {
        for (category, files) in buckets {
            let folder = config.source_dir.join(&category);

            if let Err(e) = Self::prepare_folder(&folder, config.dry_run, result) {
                OutputFormatter::error(&e.to_string());
                result.record_error(e);
                continue;
            }

            for file in files {
                Self::move_file(&file, &folder, config.dry_run, result);
            }
        }
    }

    /// Makes sure `folder` exists as a directory.
    fn prepare_folder(folder: &Path, dry_run: bool, result: &mut RunResult) -> OrganizeResult<()> {
        match fs::metadata(folder) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(OrganizeError::FolderCreate {
                path: folder.to_path_buf(),
                source: std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    "a file with this name already exists",
                ),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if dry_run {
                    OutputFormatter::dry_run_notice(&format!(
                        "Creating folder: {}",
                        folder.display()
                    ));
                    return Ok(());
                }

                OutputFormatter::plain(&format!("Creating folder: {}", folder.display()));
                fs::create_dir_all(folder).map_err(|e| OrganizeError::FolderCreate {
                    path: folder.to_path_buf(),
                    source: e,
                })?;
                result.folders_created += 1;
                Ok(())
            }
            Err(e) => Err(OrganizeError::FolderCreate {
                path: folder.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Moves one file into `folder` under a collision-free name.
    fn move_file(file: &FileRecord, folder: &Path, dry_run: bool, result: &mut RunResult) {
        // The on-disk name, which `file.name` only approximates for non-UTF-8 names.
        let file_name = file.path.file_name().unwrap_or(OsStr::new(&file.name));
        let destination = match Self::resolve_destination(folder, file_name) {
            Ok(destination) => destination,
            Err(e) => {
                OutputFormatter::error(&e.to_string());
                result.record_error(e);
                return;
            }
        };

        if dry_run {
            OutputFormatter::dry_run_notice(&format!(
                "Moving file: {} -> {}",
                file.path.display(),
                destination.display()
            ));
            return;
        }

        OutputFormatter::plain(&format!(
            "Moving file: {} -> {}",
            file.path.display(),
            destination.display()
        ));
        match fs::rename(&file.path, &destination) {
            Ok(()) => result.files_moved += 1,
            Err(e) => {
                let error = OrganizeError::FileMove {
                    from: file.path.clone(),
                    to: destination,
                    source: e,
                };
                OutputFormatter::error(&error.to_string());
                result.record_error(error);
            }
        }
    }
}

/// Inserts `_<counter>` before the last `.` of `file_name`, or appends it
/// when there is no dot.
fn suffixed_name(file_name: &OsStr, counter: u32) -> OsString {
    let path = Path::new(file_name);
    let mut name = OsString::new();
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(extension)) => {
            name.push(stem);
            name.push(format!("_{}.", counter));
            name.push(extension);
        }
        // ".profile": the last dot is the first character.
        _ if file_name.as_encoded_bytes().starts_with(b".") => {
            name.push(format!("_{}", counter));
            name.push(file_name);
        }
        _ => {
            name.push(file_name);
            name.push(format!("_{}", counter));
        }
    }
    name
}

/// True when nothing, not even a dangling symlink, exists at `path`.
fn is_free(path: &Path) -> bool {
    matches!(fs::symlink_metadata(path), Err(e) if e.kind() == ErrorKind::NotFound)
}
