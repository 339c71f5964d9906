//! Gitignore-style pattern compilation and matching.
//!
//! A [`PatternSpec`] wraps an ordered [`Gitignore`] matcher evaluated with
//! gitwildmatch semantics: every pattern is tested against the path and the
//! last one that matches decides. A matching pattern means "ignored" unless
//! it is negated with a leading `!`, in which case it means "not ignored".
//! A pattern that matches a directory also matches everything below it.
//!
//! Paths are matched relative to the base directory. On unix, names that are
//! not valid UTF-8 are matched byte-wise, so `*.txt` still catches them.

use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::warn;

use crate::error::LocscanError;
use crate::Result;

/// An ordered, compiled set of gitignore-style patterns.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    matcher: Gitignore,
}

impl Default for PatternSpec {
    fn default() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }
}

impl PatternSpec {
    /// A spec that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile pattern lines, failing on the first invalid glob.
    ///
    /// Blank lines and `#` comments carry no rule and are skipped.
    pub fn try_compile<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(".");
        for line in lines {
            let line = line.as_ref();
            builder
                .add_line(None, line)
                .map_err(|e| LocscanError::InvalidGlob {
                    pattern: line.trim_end().to_string(),
                    message: e.to_string(),
                })?;
        }

        let matcher = builder.build().map_err(|e| LocscanError::InvalidGlob {
            pattern: lines.iter().map(|l| l.as_ref()).collect::<Vec<_>>().join(", "),
            message: e.to_string(),
        })?;
        Ok(Self { matcher })
    }

    /// Compile pattern lines, degrading to an empty spec if any is invalid.
    pub fn compile<S: AsRef<str>>(lines: &[S]) -> Self {
        match Self::try_compile(lines) {
            Ok(spec) => spec,
            Err(e) => {
                let all: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
                warn!("could not compile ignore patterns ({e}); patterns were: {all:?}");
                Self::empty()
            }
        }
    }

    /// Number of active patterns.
    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    /// Whether there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Check a path relative to the base directory.
    ///
    /// The path is ignored if the last pattern matching it, or failing that
    /// one of its ancestor directories, is not negated. The base itself
    /// (an empty path or `.`) is never ignored.
    pub fn is_ignored(&self, relative_path: impl AsRef<Path>, is_dir: bool) -> bool {
        let relative = normal_components(relative_path.as_ref());
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(&relative, is_dir)
            .is_ignore()
    }

    /// Check a filesystem path against the patterns, relative to `base`.
    ///
    /// Paths outside `base` are never ignored.
    pub fn is_path_ignored(&self, path: &Path, base: &Path, is_dir: bool) -> bool {
        match path.strip_prefix(base) {
            Ok(relative) => self.is_ignored(relative, is_dir),
            Err(_) => false,
        }
    }
}

/// Keep only the named components of a relative path.
fn normal_components(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect()
}
