//! Line counting under comment and whitespace rules.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`. A physical line counts as
//! code when, after its line ending is removed:
//!
//! - it is not empty
//! - it is not whitespace-only, unless whitespace-only lines are counted
//! - its trimmed text does not start with any comment marker
//!
//! The same markers apply to every file regardless of its language. Bytes
//! that are not valid UTF-8 are dropped rather than failing the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LocscanError;
use crate::options::ScanOptions;

/// Result of counting one file.
///
/// An error does not discard the lines counted before it happened.
#[derive(Debug)]
pub struct FileCount {
    /// Lines of code counted
    pub loc: u64,
    /// The error that stopped counting early, if any
    pub error: Option<LocscanError>,
}

/// Counts lines of code in text files.
#[derive(Debug, Clone)]
pub struct LineCounter {
    count_whitespace_only: bool,
    comment_markers: Vec<String>,
}

impl Default for LineCounter {
    fn default() -> Self {
        Self::from_options(&ScanOptions::default())
    }
}

impl LineCounter {
    /// Create a counter. Empty markers are ignored.
    pub fn new<S: AsRef<str>>(count_whitespace_only: bool, comment_markers: &[S]) -> Self {
        Self {
            count_whitespace_only,
            comment_markers: comment_markers
                .iter()
                .map(|m| m.as_ref().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Create a counter from scan options.
    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(options.count_whitespace_only, &options.comment_markers)
    }

    /// Count the lines of code in a file.
    pub fn count_file(&self, path: &Path) -> FileCount {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                return FileCount {
                    loc: 0,
                    error: Some(LocscanError::FileRead {
                        path: path.to_path_buf(),
                        source: e,
                    }),
                }
            }
        };

        let (loc, error) = self.count_reader(BufReader::new(file));
        FileCount {
            loc,
            error: error.map(|e| LocscanError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Count the lines of code from any buffered reader.
    ///
    /// Returns the count so far together with the read error that ended it, if any.
    pub fn count_reader<R: BufRead>(&self, mut reader: R) -> (u64, Option<std::io::Error>) {
        let mut loc = 0;
        let mut raw = Vec::new();
        let mut line = String::new();

        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw) {
                Ok(0) => return (loc, None),
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return (loc, Some(e)),
            }

            for piece in raw.split(|&b| b == b'\r') {
                line.clear();
                for chunk in piece.utf8_chunks() {
                    line.push_str(chunk.valid());
                }

                if self.is_code_line(&line) {
                    loc += 1;
                }
            }
        }
    }

    /// Classify a single line (with or without its line ending).
    pub fn is_code_line(&self, line: &str) -> bool {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.is_empty() {
            return false;
        }

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return self.count_whitespace_only;
        }

        !self
            .comment_markers
            .iter()
            .any(|marker| trimmed.starts_with(marker.as_str()))
    }
}
