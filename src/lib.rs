//! fileorg - organize a directory's files into subfolders
//!
//! Files directly inside a directory are grouped by extension, last-modified
//! month or size tier and moved into one subfolder per group. Name
//! collisions get a numeric suffix, and a dry run reports every action
//! without touching the disk.

pub mod cli;
pub mod config;
pub mod file_organizer;
pub mod output;
pub mod report;
pub mod scanner;
pub mod strategy;

pub use config::{CompiledFilters, ConfigError, Configuration, FilterConfig};
pub use file_organizer::{BucketMap, FileOrganizer, OrganizeError, group, organize};
pub use report::RunResult;
pub use scanner::{FileRecord, scan};
pub use strategy::{Categorizer, Strategy};

pub use cli::{Cli, run_cli};
