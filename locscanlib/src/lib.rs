//! # locscanlib
//!
//! A gitignore-aware lines of code counter library.
//!
//! ## Overview
//!
//! Given a base directory and a set of targets, the library walks the file
//! tree, skips everything matched by gitignore-style patterns, keeps only
//! files that look like source code, and counts their non-blank,
//! non-comment lines.
//!
//! - **Patterns**: gitwildmatch semantics with negation, anchoring and
//!   directory-only rules; an ignored directory is never entered
//! - **Classification**: extension tables first, then a content sniff that
//!   rejects binary files
//! - **Counting**: one set of comment markers for every file; whitespace-only
//!   lines are optional
//! - **Deduplication**: overlapping targets and symlinks are counted once
//!
//! Nothing met during a scan is fatal. Missing targets, unreadable
//! directories and broken files become [`ScanWarning`]s on the result.
//!
//! ## Example
//!
//! ```rust
//! use locscanlib::{scan, ScanOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("src")).unwrap();
//! fs::write(dir.path().join("src/app.py"), "# entry point\nimport os\n\nprint(os.name)\n").unwrap();
//! fs::create_dir(dir.path().join("build")).unwrap();
//! fs::write(dir.path().join("build/gen.py"), "x = 1\n").unwrap();
//! fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();
//!
//! let result = scan(dir.path(), &["."], &ScanOptions::new());
//! assert_eq!(result.total_loc, 2);
//! assert_eq!(result.files_processed, 1);
//!
//! // Extra exclude patterns apply after the gitignore file
//! let options = ScanOptions::new().exclude("*.py");
//! let result = scan(dir.path(), &["."], &options);
//! assert_eq!(result.files_processed, 0);
//! ```

pub mod data;
pub mod defaults;
pub mod error;
pub mod options;
pub mod source;

pub use data::{
    scan, Classification, FileCount, FileStats, LineCounter, ScanEvent, ScanResult, Scanner,
};
pub use error::{LocscanError, ScanWarning, WarningKind};
pub use options::{GitignoreSource, ScanOptions, SniffOptions};
pub use source::{FileClassifier, IgnoreRules, PatternSpec};

/// Result type for locscanlib operations
pub type Result<T> = std::result::Result<T, LocscanError>;
