//! Core data structures for scan results.
//!
//! A scan produces a single [`ScanResult`]: the total LOC, the number of files
//! counted, and the per-file breakdown in traversal order. Non-fatal problems
//! are kept alongside as [`ScanWarning`]s, and per-path decisions as
//! [`ScanEvent`]s when requested.

use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use crate::error::ScanWarning;

/// Outcome of classifying one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Extension or name is blacklisted
    Excluded,
    /// Extension is allow-listed
    Included,
    /// Decided by content inspection
    Sniffed { is_text: bool },
}

impl Classification {
    /// Whether the file should be opened for counting.
    pub fn should_process(&self) -> bool {
        match self {
            Self::Excluded => false,
            Self::Included => true,
            Self::Sniffed { is_text } => *is_text,
        }
    }
}

/// Statistics for a single counted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Path relative to the scan base, or absolute when outside it.
    pub path: String,
    /// Lines of code in this file.
    pub loc: u64,
}

impl FileStats {
    /// Create new file stats.
    pub fn new(path: impl Into<String>, loc: u64) -> Self {
        Self {
            path: path.into(),
            loc,
        }
    }
}

/// A per-path decision taken during a scan.
///
/// The `Display` form is the verbose output line for the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "path", rename_all = "snake_case")]
pub enum ScanEvent {
    /// The path matched the ignore patterns
    Ignored(String),
    /// The file is being counted
    Processing(String),
    /// The file was excluded by name or detected as binary
    Skipped(String),
    /// The directory is being descended into
    ScanningDirectory(String),
}

impl ScanEvent {
    /// The display path the event is about.
    pub fn path(&self) -> &str {
        match self {
            Self::Ignored(p) | Self::Processing(p) | Self::Skipped(p) | Self::ScanningDirectory(p) => p,
        }
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored(p) => write!(f, "ignoring {p} (matched by spec)"),
            Self::Processing(p) => write!(f, "processing file: {p}"),
            Self::Skipped(p) => write!(f, "skipping excluded/binary file: {p}"),
            Self::ScanningDirectory(p) => write!(f, "scanning directory: {p}"),
        }
    }
}

/// Result of scanning one or more targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Total lines of code across all counted files
    pub total_loc: u64,
    /// Number of files counted
    pub files_processed: u64,
    /// Counted files in traversal order
    pub files: Vec<FileStats>,
    /// Non-fatal problems met during the scan
    pub warnings: Vec<ScanWarning>,
    /// Per-path decisions, when event recording is enabled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<ScanEvent>,
}

impl ScanResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a counted file.
    pub fn add_file(&mut self, file: FileStats) {
        self.total_loc += file.loc;
        self.files_processed += 1;
        self.files.push(file);
    }

    /// Paths of the counted files, relative to the scan base, in traversal order.
    pub fn processed_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

impl AddAssign for ScanResult {
    fn add_assign(&mut self, other: Self) {
        self.total_loc += other.total_loc;
        self.files_processed += other.files_processed;
        self.files.extend(other.files);
        self.warnings.extend(other.warnings);
        self.events.extend(other.events);
    }
}
