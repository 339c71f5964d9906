//! Data collection: count lines and aggregate results.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Counting**: [`LineCounter`] applies the comment and whitespace rules
//! - **Scanning**: [`Scanner`] walks targets, prunes ignored paths and sums counts
//! - **Statistics**: [`ScanResult`], [`FileStats`] and [`ScanEvent`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use locscanlib::data::Scanner;
//! use locscanlib::ScanOptions;
//!
//! let result = Scanner::new(".", &ScanOptions::new()).scan(&["src"]);
//! println!("Total LOC: {}", result.total_loc);
//! ```

pub mod counter;
pub mod scanner;
pub mod stats;

pub use counter::{FileCount, LineCounter};
pub use scanner::{scan, Scanner};
pub use stats::{Classification, FileStats, ScanEvent, ScanResult};
