//! Deciding which files are code worth counting.
//!
//! The decision is made in three steps, first match wins:
//!
//! 1. the lowercased file name, or any dot-suffix of it, is in the excluded
//!    table → [`Classification::Excluded`]
//! 2. the extension is in the (non-empty) included table → [`Classification::Included`]
//! 3. otherwise the content is sniffed → [`Classification::Sniffed`]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::data::stats::Classification;
use crate::options::{ScanOptions, SniffOptions};

/// Extension and content based file classifier.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    excluded: BTreeSet<String>,
    included: BTreeSet<String>,
    sniff: SniffOptions,
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::from_options(&ScanOptions::default())
    }
}

impl FileClassifier {
    /// Create a classifier from explicit tables.
    pub fn new(excluded: BTreeSet<String>, included: BTreeSet<String>, sniff: SniffOptions) -> Self {
        Self {
            excluded,
            included,
            sniff,
        }
    }

    /// Create a classifier from scan options.
    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(
            options.excluded_names.clone(),
            options.included_extensions.clone(),
            options.sniff,
        )
    }

    /// Classify a file.
    pub fn classify(&self, path: &Path) -> Classification {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if self.is_excluded_name(&name) {
            return Classification::Excluded;
        }

        if !self.included.is_empty() {
            if let Some(ext) = extension_of(&name) {
                if self.included.contains(ext) {
                    return Classification::Included;
                }
            }
        }

        Classification::Sniffed {
            is_text: looks_like_text(path, &self.sniff),
        }
    }

    /// Whether a file should be opened for counting.
    pub fn should_process(&self, path: &Path) -> bool {
        self.classify(path).should_process()
    }

    fn is_excluded_name(&self, name: &str) -> bool {
        if self.excluded.contains(name) {
            return true;
        }
        // every ".suffix" after the first character: ".min.js" and ".js" for "app.min.js"
        name.char_indices()
            .skip(1)
            .filter(|(_, c)| *c == '.')
            .any(|(i, _)| self.excluded.contains(&name[i..]))
    }
}

/// The last extension of a lowercase file name, with its leading dot.
///
/// Dot-files such as `.bashrc` have no extension.
fn extension_of(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(&name[i..]),
    }
}

/// Heuristically decide whether a file holds text.
///
/// Reads up to `sample_size` bytes. An empty file is text. A null byte, or a
/// share of bytes above 127 larger than `max_high_bit_ratio`, means binary.
/// Finally the first `decode_window` bytes must be valid UTF-8; a multi-byte
/// character cut off by the window edge is tolerated. Any read error means
/// binary.
pub fn looks_like_text(path: &Path, options: &SniffOptions) -> bool {
    let mut sample = Vec::with_capacity(options.sample_size);
    let read = File::open(path).and_then(|file| {
        file.take(options.sample_size as u64)
            .read_to_end(&mut sample)
    });
    if read.is_err() {
        return false;
    }

    sample_looks_like_text(&sample, options)
}

/// The content rules of [`looks_like_text`], applied to an in-memory sample.
pub fn sample_looks_like_text(sample: &[u8], options: &SniffOptions) -> bool {
    if sample.is_empty() {
        return true;
    }

    if sample.contains(&0) {
        return false;
    }

    let high_bit = sample.iter().filter(|b| **b > 127).count();
    if high_bit as f64 / sample.len() as f64 > options.max_high_bit_ratio {
        return false;
    }

    let window = &sample[..sample.len().min(options.decode_window)];
    match std::str::from_utf8(window) {
        Ok(_) => true,
        // incomplete sequence at the window edge, the rest lies beyond it
        Err(e) => e.error_len().is_none() && window.len() < sample.len(),
    }
}
