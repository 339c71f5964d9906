//! Error types for locscanlib
//!
//! Every condition the scanner meets while walking a tree is recoverable:
//! a [`LocscanError`] is turned into a [`ScanWarning`] attached to the path
//! that caused it, and the scan carries on.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during LOC counting
#[derive(Error, Debug)]
pub enum LocscanError {
    /// Path could not be canonicalized (permissions, symlink loop, ...)
    #[error("could not resolve path '{path}': {source}")]
    PathResolution {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("target path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Failed to enumerate a directory
    #[error("could not read directory '{path}': {message}")]
    DirectoryRead { path: PathBuf, message: String },

    /// Failed to open or read a file
    #[error("could not read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// An explicitly requested gitignore file is missing
    #[error("specified gitignore file not found: {0}")]
    GitignoreNotFound(PathBuf),
}

impl LocscanError {
    /// The path this error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathResolution { path, .. }
            | Self::DirectoryRead { path, .. }
            | Self::FileRead { path, .. } => Some(path),
            Self::PathNotFound(path) | Self::GitignoreNotFound(path) => Some(path),
            Self::InvalidGlob { .. } => None,
        }
    }

    /// Classify the error for reporting as a warning.
    pub fn warning_kind(&self) -> WarningKind {
        match self {
            Self::PathResolution { .. } => WarningKind::PathResolution,
            Self::PathNotFound(_) => WarningKind::PathNotFound,
            Self::DirectoryRead { .. } => WarningKind::DirectoryRead,
            Self::FileRead { .. } => WarningKind::FileRead,
            Self::InvalidGlob { .. } => WarningKind::PatternCompile,
            Self::GitignoreNotFound(_) => WarningKind::GitignoreNotFound,
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Target could not be canonicalized.
    PathResolution,
    /// Target does not exist.
    PathNotFound,
    /// Directory children could not be enumerated.
    DirectoryRead,
    /// File could not be opened or read while counting.
    FileRead,
    /// Ignore patterns failed to compile.
    PatternCompile,
    /// The gitignore file given explicitly does not exist.
    GitignoreNotFound,
    /// Entry is neither a regular file nor a directory.
    UnsupportedEntry,
    /// Target lies outside the base directory, ignore rules were not applied.
    OutsideBase,
}

/// Non-fatal warning encountered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Build a warning from an error, falling back to `fallback` when the
    /// error carries no path of its own.
    pub fn from_error(error: &LocscanError, fallback: &Path) -> Self {
        Self {
            path: error.path().unwrap_or(fallback).to_path_buf(),
            message: error.to_string(),
            kind: error.warning_kind(),
        }
    }

    /// Warning for an entry that is neither a file nor a directory.
    pub fn unsupported_entry(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "target is neither a file nor a directory: {}",
                path.display()
            ),
            path,
            kind: WarningKind::UnsupportedEntry,
        }
    }

    /// Warning for a target outside the scan base.
    pub fn outside_base(path: impl Into<PathBuf>, base: &Path) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "target {} is outside the base directory {}, ignore rules do not apply",
                path.display(),
                base.display()
            ),
            path,
            kind: WarningKind::OutsideBase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_from_error_uses_error_path() {
        let err = LocscanError::PathNotFound(PathBuf::from("missing/dir"));
        let warning = ScanWarning::from_error(&err, Path::new("fallback"));

        assert_eq!(warning.path, PathBuf::from("missing/dir"));
        assert_eq!(warning.kind, WarningKind::PathNotFound);
        assert!(warning.message.contains("does not exist"));
    }

    #[test]
    fn test_warning_from_error_without_path() {
        let err = LocscanError::InvalidGlob {
            pattern: "[oops".to_string(),
            message: "invalid range pattern".to_string(),
        };
        let warning = ScanWarning::from_error(&err, Path::new(".gitignore"));

        assert_eq!(warning.path, PathBuf::from(".gitignore"));
        assert_eq!(warning.kind, WarningKind::PatternCompile);
        assert!(warning.message.contains("[oops"));
    }

    #[test]
    fn test_missing_gitignore_warning() {
        let err = LocscanError::GitignoreNotFound(PathBuf::from("nope/.gitignore"));
        let warning = ScanWarning::from_error(&err, Path::new("."));

        assert_eq!(warning.path, PathBuf::from("nope/.gitignore"));
        assert_eq!(warning.kind, WarningKind::GitignoreNotFound);
        assert_eq!(
            warning.message,
            "specified gitignore file not found: nope/.gitignore"
        );
    }

    #[test]
    fn test_unsupported_entry_warning() {
        let warning = ScanWarning::unsupported_entry("/dev/null");
        assert_eq!(warning.kind, WarningKind::UnsupportedEntry);
        assert!(warning.message.contains("neither a file nor a directory"));
    }
}
