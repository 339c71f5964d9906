//! Source discovery: decide which files to count.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **Patterns**: gitignore-style matching with [`PatternSpec`]
//! - **Pattern sources**: gitignore file, built-ins and excludes via [`build_rules`]
//! - **Classification**: extension tables and content sniffing in [`FileClassifier`]
//!
//! ## Example
//!
//! ```rust
//! use locscanlib::source::PatternSpec;
//!
//! let spec = PatternSpec::compile(&["*.log", "build/"]);
//! assert!(spec.is_ignored("build/out.txt", false));
//! ```

pub mod classify;
pub mod gitignore;
pub mod pattern;

pub use classify::{looks_like_text, FileClassifier};
pub use gitignore::{build_rules, collect_patterns, resolve_gitignore, CollectedPatterns, IgnoreRules};
pub use pattern::PatternSpec;
