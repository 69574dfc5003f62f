//! Classification strategies for grouping files into category folders.
//!
//! A strategy maps a scanned [`FileRecord`] to the name of the folder it
//! belongs in. Three strategies ship with the crate: by extension, by
//! last-modified month and by size tier.
//!
//! # Examples
//!
//! ```
//! use fileorg::strategy::Strategy;
//!
//! assert_eq!(Strategy::Extension.label(), "extension");
//! assert_eq!(Strategy::Size.label(), "size");
//! ```

use crate::scanner::FileRecord;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Lower bound (inclusive) of the `medium` size tier: 1 MiB.
pub const SMALL_LIMIT: u64 = 1024 * 1024;

/// Upper bound (inclusive) of the `medium` size tier: 100 MiB.
pub const LARGE_LIMIT: u64 = 100 * 1024 * 1024;

/// Category used by [`ExtensionStrategy`] for files without an extension.
pub const NO_EXTENSION_CATEGORY: &str = "misc";

/// Maps a file to the category folder it should be moved into.
///
/// Implementations must be pure: the same record always yields the same
/// category, and no filesystem access happens here.
pub trait Categorizer {
    /// Returns the category label for `file`.
    fn categorize(&self, file: &FileRecord) -> String;
}

/// Groups files by their lowercase extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionStrategy;

impl Categorizer for ExtensionStrategy {
    fn categorize(&self, file: &FileRecord) -> String {
        if file.extension.is_empty() {
            NO_EXTENSION_CATEGORY.to_string()
        } else {
            file.extension.clone()
        }
    }
}

/// Groups files by the year and month they were last modified (`YYYY-MM`).
///
/// The timestamp is formatted in the offset it was recorded with.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifiedDateStrategy;

impl Categorizer for ModifiedDateStrategy {
    fn categorize(&self, file: &FileRecord) -> String {
        file.modified.format("%Y-%m").to_string()
    }
}

/// Groups files into `small`, `medium` and `large` tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeStrategy;

impl SizeStrategy {
    /// Returns the tier name for a size in bytes.
    ///
    /// Both 1 MiB and 100 MiB fall into `medium`.
    pub fn tier(size: u64) -> &'static str {
        if size < SMALL_LIMIT {
            "small"
        } else if size <= LARGE_LIMIT {
            "medium"
        } else {
            "large"
        }
    }
}

impl Categorizer for SizeStrategy {
    fn categorize(&self, file: &FileRecord) -> String {
        Self::tier(file.size).to_string()
    }
}

/// The strategy selected for a run, as accepted by `--by` and the
/// settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Group by file extension.
    #[default]
    Extension,
    /// Group by last-modified month.
    Date,
    /// Group by size tier.
    Size,
}

impl Strategy {
    /// Returns the name used on the command line for this strategy.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Extension => "extension",
            Strategy::Date => "date",
            Strategy::Size => "size",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Categorizer for Strategy {
    fn categorize(&self, file: &FileRecord) -> String {
        match self {
            Strategy::Extension => ExtensionStrategy.categorize(file),
            Strategy::Date => ModifiedDateStrategy.categorize(file),
            Strategy::Size => SizeStrategy.categorize(file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // proptest's prelude also exports a `Strategy` trait.
    use super::Strategy;
    use chrono::{FixedOffset, TimeZone};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn record(name: &str, extension: &str, size: u64) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            size,
            path: PathBuf::from("/data").join(name),
            modified: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .unwrap(),
            extension: extension.to_string(),
        }
    }

    fn record_modified(year: i32, month: u32, day: u32, offset_secs: i32) -> FileRecord {
        let mut file = record("photo.jpg", "jpg", 10);
        file.modified = FixedOffset::east_opt(offset_secs)
            .unwrap()
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap();
        file
    }

    #[test]
    fn test_extension_strategy_uses_extension() {
        assert_eq!(ExtensionStrategy.categorize(&record("a.pdf", "pdf", 1)), "pdf");
        assert_eq!(
            ExtensionStrategy.categorize(&record("b.jpeg", "jpeg", 1)),
            "jpeg"
        );
    }

    #[test]
    fn test_extension_strategy_misc_without_extension() {
        assert_eq!(
            ExtensionStrategy.categorize(&record("README", "", 1)),
            NO_EXTENSION_CATEGORY
        );
    }

    #[test]
    fn test_date_strategy_formats_year_month() {
        let cases = [
            (2023, 1, 15, "2023-01"),
            (2025, 12, 31, "2025-12"),
            (2024, 2, 29, "2024-02"),
            (2020, 6, 1, "2020-06"),
        ];
        for (year, month, day, expected) in cases {
            assert_eq!(
                ModifiedDateStrategy.categorize(&record_modified(year, month, day, 0)),
                expected
            );
        }
    }

    #[test]
    fn test_date_strategy_keeps_recorded_offset() {
        // 2023-12-31T23:30 at -05:00 is already January in UTC.
        let mut file = record("late.txt", "txt", 1);
        file.modified = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 30, 0)
            .unwrap();
        assert_eq!(ModifiedDateStrategy.categorize(&file), "2023-12");
    }

    #[test]
    fn test_size_strategy_boundaries() {
        assert_eq!(SizeStrategy::tier(0), "small");
        assert_eq!(SizeStrategy::tier(1024), "small");
        assert_eq!(SizeStrategy::tier(SMALL_LIMIT - 1), "small");
        assert_eq!(SizeStrategy::tier(SMALL_LIMIT), "medium");
        assert_eq!(SizeStrategy::tier(50 * SMALL_LIMIT), "medium");
        assert_eq!(SizeStrategy::tier(LARGE_LIMIT), "medium");
        assert_eq!(SizeStrategy::tier(LARGE_LIMIT + 1), "large");
        assert_eq!(SizeStrategy::tier(101 * SMALL_LIMIT), "large");
    }

    #[test]
    fn test_strategy_enum_dispatches() {
        let file = record("clip.MOV", "mov", 200 * SMALL_LIMIT);
        assert_eq!(Strategy::Extension.categorize(&file), "mov");
        assert_eq!(Strategy::Date.categorize(&file), "2024-01");
        assert_eq!(Strategy::Size.categorize(&file), "large");
    }

    #[test]
    fn test_strategy_parses_from_cli_value() {
        assert_eq!(Strategy::from_str("date", true).unwrap(), Strategy::Date);
        assert!(Strategy::from_str("color", true).is_err());
        assert_eq!(Strategy::default(), Strategy::Extension);
    }

    proptest! {
        #[test]
        fn size_tier_matches_thresholds(size in any::<u64>()) {
            let expected = if size < 1_048_576 {
                "small"
            } else if size <= 104_857_600 {
                "medium"
            } else {
                "large"
            };
            prop_assert_eq!(SizeStrategy::tier(size), expected);
        }

        #[test]
        fn extension_strategy_never_returns_empty(ext in "[a-z0-9]{0,5}") {
            let file = record("f", &ext, 1);
            let category = ExtensionStrategy.categorize(&file);
            prop_assert!(!category.is_empty());
        }
    }
}
