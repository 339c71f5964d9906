//! Input options for scanning.
//!
//! This module contains all configuration types that control which paths
//! are ignored, which files are counted, and how their lines are counted.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::defaults;

/// Where gitignore patterns come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum GitignoreSource {
    /// Look for `.gitignore` in the base directory only.
    #[default]
    Auto,
    /// Load patterns from this file (relative paths resolve against the base directory).
    File(PathBuf),
    /// Load no gitignore file and suppress the essential built-in patterns.
    Disabled,
}

impl GitignoreSource {
    /// Map the three states of a `--gitignore` style argument.
    ///
    /// - absent → [`GitignoreSource::Auto`]
    /// - empty or whitespace-only → [`GitignoreSource::Disabled`]
    /// - anything else → [`GitignoreSource::File`]
    pub fn from_cli(value: Option<&str>) -> Self {
        match value {
            None => Self::Auto,
            Some(s) if s.trim().is_empty() => Self::Disabled,
            Some(s) => Self::File(PathBuf::from(s)),
        }
    }

    /// Whether gitignore processing was explicitly turned off.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// Parameters of the text/binary content heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SniffOptions {
    /// Bytes read from the start of the file
    pub sample_size: usize,
    /// Leading bytes of the sample that must decode as UTF-8
    pub decode_window: usize,
    /// Samples with a larger share of bytes above 127 are binary
    pub max_high_bit_ratio: f64,
}

impl Default for SniffOptions {
    fn default() -> Self {
        Self {
            sample_size: defaults::SNIFF_SAMPLE_SIZE,
            decode_window: defaults::SNIFF_DECODE_WINDOW,
            max_high_bit_ratio: defaults::SNIFF_MAX_HIGH_BIT_RATIO,
        }
    }
}

impl SniffOptions {
    /// Builder: set the sample size
    pub fn sample_size(mut self, bytes: usize) -> Self {
        self.sample_size = bytes;
        self
    }

    /// Builder: set the UTF-8 decode window
    pub fn decode_window(mut self, bytes: usize) -> Self {
        self.decode_window = bytes;
        self
    }

    /// Builder: set the high-bit byte ratio threshold
    pub fn max_high_bit_ratio(mut self, ratio: f64) -> Self {
        self.max_high_bit_ratio = ratio;
        self
    }
}

/// Options for a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOptions {
    /// Gitignore file selection
    pub gitignore: GitignoreSource,
    /// Extra gitignore-style patterns, highest precedence
    pub exclude_patterns: Vec<String>,
    /// Include the essential patterns (`.git/`, `__pycache__/`)
    pub use_builtin_patterns: bool,
    /// Include the common generated-file patterns
    pub use_generated_patterns: bool,
    /// Count lines that contain only whitespace
    pub count_whitespace_only: bool,
    /// Prefixes marking a line as a comment
    pub comment_markers: Vec<String>,
    /// Lowercase extensions and file names never counted
    pub excluded_names: BTreeSet<String>,
    /// Lowercase extensions counted without sniffing (empty = always sniff)
    pub included_extensions: BTreeSet<String>,
    /// Content sniffing parameters
    pub sniff: SniffOptions,
    /// Record per-path decisions in the scan result
    pub record_events: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            gitignore: GitignoreSource::Auto,
            exclude_patterns: Vec::new(),
            use_builtin_patterns: true,
            use_generated_patterns: false,
            count_whitespace_only: defaults::COUNT_WHITESPACE_ONLY_LINES,
            comment_markers: defaults::COMMENT_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            excluded_names: lowercase_set(defaults::EXCLUDED_NAMES),
            included_extensions: lowercase_set(defaults::INCLUDED_EXTENSIONS),
            sniff: SniffOptions::default(),
            record_events: false,
        }
    }
}

fn lowercase_set<S: AsRef<str>>(items: &[S]) -> BTreeSet<String> {
    items.iter().map(|s| s.as_ref().to_lowercase()).collect()
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the gitignore source.
    pub fn gitignore(mut self, source: GitignoreSource) -> Self {
        self.gitignore = source;
        self
    }

    /// Add one exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Add several exclude patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.exclude_patterns
            .extend(patterns.iter().map(|p| p.as_ref().to_string()));
        self
    }

    /// Toggle the essential built-in patterns.
    pub fn builtin_patterns(mut self, enabled: bool) -> Self {
        self.use_builtin_patterns = enabled;
        self
    }

    /// Toggle the generated-file patterns.
    pub fn generated_patterns(mut self, enabled: bool) -> Self {
        self.use_generated_patterns = enabled;
        self
    }

    /// Toggle counting of whitespace-only lines.
    pub fn count_whitespace_only(mut self, enabled: bool) -> Self {
        self.count_whitespace_only = enabled;
        self
    }

    /// Replace the comment markers. Empty markers are dropped.
    pub fn comment_markers<S: AsRef<str>>(mut self, markers: &[S]) -> Self {
        self.comment_markers = markers
            .iter()
            .map(|m| m.as_ref().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    /// Replace the excluded extension/name table.
    pub fn excluded_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.excluded_names = lowercase_set(names);
        self
    }

    /// Replace the included extension table. An empty table disables it.
    pub fn included_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.included_extensions = lowercase_set(extensions);
        self
    }

    /// Set the content sniffing parameters.
    pub fn sniff(mut self, sniff: SniffOptions) -> Self {
        self.sniff = sniff;
        self
    }

    /// Record per-path decisions in [`crate::ScanResult::events`].
    pub fn record_events(mut self, enabled: bool) -> Self {
        self.record_events = enabled;
        self
    }

    /// Whether the essential patterns apply, after the disable marker is honored.
    pub fn builtins_enabled(&self) -> bool {
        self.use_builtin_patterns && !self.gitignore.is_disabled()
    }
}
