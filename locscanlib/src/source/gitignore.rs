//! Assembling a [`PatternSpec`] from its sources.
//!
//! Patterns are concatenated in fixed precedence, lowest first:
//!
//! 1. the gitignore file (auto-detected in the base directory, or explicit)
//! 2. the essential built-ins (`.git/`, `__pycache__/`), unless disabled
//! 3. the generated-file patterns, when requested
//! 4. caller-supplied exclude patterns
//!
//! Later patterns override earlier ones, so an exclude pattern can both add
//! to and re-include (`!`) anything the gitignore file says.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::defaults;
use crate::error::{LocscanError, ScanWarning};
use crate::options::{GitignoreSource, ScanOptions};
use crate::Result;

use super::pattern::PatternSpec;

/// File name looked up in the base directory in auto-detect mode.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Resolve which gitignore file, if any, should be loaded.
///
/// Auto-detection quietly finds nothing when there is no `.gitignore`; an
/// explicit path that is not a regular file is an error.
pub fn resolve_gitignore(source: &GitignoreSource, base: &Path) -> Result<Option<PathBuf>> {
    match source {
        GitignoreSource::Disabled => Ok(None),
        GitignoreSource::Auto => {
            let candidate = base.join(GITIGNORE_FILE_NAME);
            Ok(candidate.is_file().then_some(candidate))
        }
        GitignoreSource::File(path) => {
            let candidate = base.join(path);
            if candidate.is_file() {
                Ok(Some(candidate))
            } else {
                Err(LocscanError::GitignoreNotFound(path.clone()))
            }
        }
    }
}

/// Read the lines of a gitignore file.
pub fn load_patterns(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| LocscanError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded patterns from: {}", path.display());
    Ok(content.lines().map(str::to_string).collect())
}

/// Raw pattern lines from every enabled source, in precedence order.
#[derive(Debug, Clone, Default)]
pub struct CollectedPatterns {
    pub lines: Vec<String>,
    /// Problems with the gitignore file; its patterns are left out
    pub warnings: Vec<ScanWarning>,
}

/// Collect the raw pattern lines from every enabled source.
pub fn collect_patterns(options: &ScanOptions, base: &Path) -> CollectedPatterns {
    let mut collected = CollectedPatterns::default();

    let loaded = resolve_gitignore(&options.gitignore, base)
        .and_then(|file| file.map(|file| load_patterns(&file)).transpose());
    match loaded {
        Ok(Some(lines)) => collected.lines.extend(lines),
        Ok(None) => {}
        Err(e) => {
            let warning = ScanWarning::from_error(&e, base);
            warn!("{}", warning.message);
            collected.warnings.push(warning);
        }
    }

    if options.builtins_enabled() {
        collected
            .lines
            .extend(defaults::ESSENTIAL_PATTERNS.iter().map(|p| p.to_string()));
    }

    if options.use_generated_patterns {
        collected
            .lines
            .extend(defaults::GENERATED_PATTERNS.iter().map(|p| p.to_string()));
    }

    if !options.exclude_patterns.is_empty() {
        info!(
            "added command-line exclude patterns: {:?}",
            options.exclude_patterns
        );
        collected.lines.extend(options.exclude_patterns.iter().cloned());
    }

    collected
}

/// Compiled ignore patterns for one base directory.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    pub spec: PatternSpec,
    /// Everything that went wrong while building `spec`
    pub warnings: Vec<ScanWarning>,
}

/// Build the ignore matcher for a scan rooted at `base`.
///
/// A pattern that fails to compile leaves the whole set empty, so nothing
/// is ignored; the failure is reported in the warnings.
pub fn build_rules(options: &ScanOptions, base: &Path) -> IgnoreRules {
    let collected = collect_patterns(options, base);
    let mut warnings = collected.warnings;

    let spec = match PatternSpec::try_compile(&collected.lines) {
        Ok(spec) => spec,
        Err(e) => {
            let warning = ScanWarning::from_error(&e, base);
            warn!("{}, no paths will be ignored", warning.message);
            warnings.push(warning);
            PatternSpec::empty()
        }
    };

    IgnoreRules { spec, warnings }
}
