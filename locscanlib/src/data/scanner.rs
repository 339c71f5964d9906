//! Recursive scan engine.
//!
//! Targets are walked depth-first. Each entry is canonicalized, checked
//! against the visited set, then against the ignore patterns; ignored
//! directories are pruned without being read. Files are classified and,
//! if they look like code, counted. Every entry is handled at most once per
//! [`Scanner::scan`] call, so overlapping targets are not double counted.
//!
//! Nothing met during the walk is fatal: problems become [`ScanWarning`]s
//! and contribute nothing (or a partial count) to the result.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{LocscanError, ScanWarning};
use crate::options::ScanOptions;
use crate::source::classify::FileClassifier;
use crate::source::gitignore::build_rules;
use crate::source::pattern::PatternSpec;

use super::counter::LineCounter;
use super::stats::{FileStats, ScanEvent, ScanResult};

/// Scans files and directories under a base directory.
#[derive(Debug, Clone)]
pub struct Scanner {
    base_dir: PathBuf,
    spec: PatternSpec,
    classifier: FileClassifier,
    counter: LineCounter,
    record_events: bool,
    /// Problems found while building the scanner, reported with every result
    setup_warnings: Vec<ScanWarning>,
}

impl Scanner {
    /// Create a scanner for `base_dir`, building its ignore patterns from `options`.
    pub fn new(base_dir: impl AsRef<Path>, options: &ScanOptions) -> Self {
        let base_dir = canonical_base(base_dir.as_ref());
        let rules = build_rules(options, &base_dir);

        Self {
            spec: rules.spec,
            classifier: FileClassifier::from_options(options),
            counter: LineCounter::from_options(options),
            record_events: options.record_events,
            setup_warnings: rules.warnings,
            base_dir,
        }
    }

    /// Scan the targets and aggregate their counts.
    ///
    /// Relative targets resolve against the base directory.
    pub fn scan<P: AsRef<Path>>(&self, targets: &[P]) -> ScanResult {
        let mut result = ScanResult::new();
        result.warnings.extend(self.setup_warnings.iter().cloned());

        let mut traversal = Traversal {
            scanner: self,
            visited: HashSet::new(),
            result,
        };

        for target in targets {
            traversal.visit(target.as_ref(), false);
        }

        traversal.result
    }
}

/// Scan `targets` under `base_dir` in one call.
pub fn scan<B, P>(base_dir: B, targets: &[P], options: &ScanOptions) -> ScanResult
where
    B: AsRef<Path>,
    P: AsRef<Path>,
{
    Scanner::new(base_dir, options).scan(targets)
}

/// State owned by one `scan` call.
struct Traversal<'a> {
    scanner: &'a Scanner,
    visited: HashSet<PathBuf>,
    result: ScanResult,
}

impl Traversal<'_> {
    /// Handle one entry. `parent_outside` is set while walking below a
    /// directory that lies outside the base.
    fn visit(&mut self, path: &Path, parent_outside: bool) {
        let scanner = self.scanner;
        let base = scanner.base_dir.as_path();
        let candidate = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };

        let resolved = match fs::canonicalize(&candidate) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if is_dangling_symlink(&candidate) {
                    self.warn(ScanWarning::unsupported_entry(path));
                    self.visited.insert(candidate);
                } else {
                    self.warn_error(LocscanError::PathNotFound(path.to_path_buf()), path);
                }
                return;
            }
            Err(e) => {
                self.warn_error(
                    LocscanError::PathResolution {
                        path: path.to_path_buf(),
                        source: e,
                    },
                    path,
                );
                return;
            }
        };

        if self.visited.contains(&resolved) {
            return;
        }

        let metadata = match fs::metadata(&resolved) {
            Ok(metadata) => metadata,
            Err(e) => {
                self.warn_error(
                    LocscanError::PathResolution {
                        path: resolved,
                        source: e,
                    },
                    path,
                );
                return;
            }
        };
        let is_dir = metadata.is_dir();

        let outside = !resolved.starts_with(base);
        if outside && !parent_outside {
            self.warn(ScanWarning::outside_base(&resolved, base));
        }

        let display = display_path(&resolved, base);

        if scanner.spec.is_path_ignored(&resolved, base, is_dir) {
            self.event(ScanEvent::Ignored(display));
            self.visited.insert(resolved);
            return;
        }

        if metadata.is_file() {
            self.visited.insert(resolved.clone());
            self.visit_file(&resolved, display);
        } else if is_dir {
            self.visited.insert(resolved.clone());
            self.event(ScanEvent::ScanningDirectory(display));
            self.visit_children(&resolved, outside);
        } else {
            self.warn(ScanWarning::unsupported_entry(path));
            self.visited.insert(resolved);
        }
    }

    fn visit_file(&mut self, path: &Path, display: String) {
        if !self.scanner.classifier.should_process(path) {
            self.event(ScanEvent::Skipped(display));
            return;
        }

        self.event(ScanEvent::Processing(display.clone()));
        let count = self.scanner.counter.count_file(path);
        if let Some(error) = count.error {
            self.warn_error(error, path);
        }
        self.result.add_file(FileStats::new(display, count.loc));
    }

    fn visit_children(&mut self, dir: &Path, outside: bool) {
        let children = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in children {
            match entry {
                Ok(entry) => self.visit(entry.path(), outside),
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    self.warn_error(
                        LocscanError::DirectoryRead {
                            path,
                            message: e.to_string(),
                        },
                        dir,
                    );
                }
            }
        }
    }

    fn event(&mut self, event: ScanEvent) {
        debug!("{event}");
        if self.scanner.record_events {
            self.result.events.push(event);
        }
    }

    fn warn_error(&mut self, error: LocscanError, fallback: &Path) {
        self.warn(ScanWarning::from_error(&error, fallback));
    }

    fn warn(&mut self, warning: ScanWarning) {
        warn!("{}", warning.message);
        self.result.warnings.push(warning);
    }
}

/// Canonicalize the base directory, falling back to an absolute path.
fn canonical_base(base: &Path) -> PathBuf {
    match fs::canonicalize(base) {
        Ok(path) => path,
        Err(e) => {
            warn!("could not resolve base directory {}: {e}", base.display());
            std::path::absolute(base).unwrap_or_else(|_| base.to_path_buf())
        }
    }
}

fn is_dangling_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Path shown to users: relative to the base (`.` for the base itself),
/// absolute when outside it.
fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;
    use crate::options::GitignoreSource;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn create_project(root: &Path) {
        write(root, "src/file1.py", b"line1\nline2\n# comment");
        write(root, "src/file2.js", b"lineA\n\nlineB");
        write(root, "tests/test_a.py", b"test1");
        write(root, "build/output.log", b"build artifact");
        write(root, "data/binary.dat", b"\x00\x01");
        write(root, ".gitignore", b"*.log\nbuild/\ndata/");
    }

    fn rel(parts: &[&str]) -> String {
        parts.iter().collect::<PathBuf>().display().to_string()
    }

    #[test]
    fn test_scan_directory_with_gitignore() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let options = ScanOptions::new().record_events(true);
        let result = Scanner::new(temp.path(), &options).scan(&["."]);

        assert_eq!(result.total_loc, 5);
        assert_eq!(result.files_processed, 3);
        assert!(result
            .events
            .contains(&ScanEvent::Ignored("build".to_string())));
        assert!(result
            .events
            .contains(&ScanEvent::Ignored("data".to_string())));
        assert!(result
            .events
            .contains(&ScanEvent::Skipped(".gitignore".to_string())));
        assert!(result
            .events
            .contains(&ScanEvent::ScanningDirectory(".".to_string())));
        assert!(!result
            .events
            .iter()
            .any(|e| e.path().contains("output.log")));
    }

    #[test]
    fn test_scan_directory_without_gitignore() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let options = ScanOptions::new().gitignore(GitignoreSource::Disabled);
        let result = Scanner::new(temp.path(), &options).scan(&["."]);

        // .log is excluded by name, binary.dat by sniffing
        assert_eq!(result.total_loc, 5);
        assert_eq!(result.files_processed, 3);
    }

    #[test]
    fn test_scan_with_cli_exclude() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let options = ScanOptions::new()
            .gitignore(GitignoreSource::Disabled)
            .exclude("*.py")
            .record_events(true);
        let result = Scanner::new(temp.path(), &options).scan(&["."]);

        assert_eq!(result.total_loc, 2);
        assert_eq!(result.files_processed, 1);
        assert!(result
            .events
            .contains(&ScanEvent::Ignored(rel(&["src", "file1.py"]))));
    }

    #[test]
    fn test_processed_paths_are_relative_and_ordered() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["."]);

        assert_eq!(
            result.processed_paths(),
            vec![
                rel(&["src", "file1.py"]),
                rel(&["src", "file2.js"]),
                rel(&["tests", "test_a.py"]),
            ]
        );
        assert_eq!(result.files[0].loc, 2);
    }

    #[test]
    fn test_single_file_target() {
        let temp = tempdir().unwrap();
        write(temp.path(), "file.py", b"line1\n# comment\nline3");

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["file.py"]);

        assert_eq!(result.total_loc, 2);
        assert_eq!(result.files_processed, 1);
        assert_eq!(result.processed_paths(), vec!["file.py"]);
    }

    #[test]
    fn test_overlapping_targets_not_double_counted() {
        let temp = tempdir().unwrap();
        write(temp.path(), "dir/file.txt", b"one\ntwo\n");
        write(temp.path(), "dir/other.rs", b"fn main() {}\n");

        let scanner = Scanner::new(temp.path(), &ScanOptions::new());
        let alone = scanner.scan(&["dir"]);
        let overlapping = scanner.scan(&["dir", "dir/file.txt", "dir"]);
        let reversed = scanner.scan(&["dir/file.txt", "dir"]);

        assert_eq!(alone.files_processed, 2);
        assert_eq!(overlapping.total_loc, alone.total_loc);
        assert_eq!(overlapping.files_processed, alone.files_processed);
        assert_eq!(reversed.total_loc, alone.total_loc);
        assert_eq!(reversed.files_processed, alone.files_processed);
    }

    #[test]
    fn test_scan_is_repeatable() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let scanner = Scanner::new(temp.path(), &ScanOptions::new());
        let first = scanner.scan(&["src", "tests"]);
        let second = scanner.scan(&["src", "tests"]);

        assert_eq!(first, second);
    }

    #[test]
    fn test_ignored_directory_is_pruned() {
        let temp = tempdir().unwrap();
        write(temp.path(), "vendor/lib.py", b"x = 1\n");
        write(temp.path(), "vendor/deep/keep.py", b"y = 2\n");
        write(temp.path(), "main.py", b"print(1)\n");

        // the negation cannot resurrect files inside a pruned directory
        let options = ScanOptions::new()
            .gitignore(GitignoreSource::Disabled)
            .exclude_many(&["vendor/", "!vendor/deep/keep.py"]);
        let result = Scanner::new(temp.path(), &options).scan(&["."]);

        assert_eq!(result.processed_paths(), vec!["main.py"]);
    }

    #[test]
    fn test_ignored_target_contributes_nothing() {
        let temp = tempdir().unwrap();
        write(temp.path(), "build/gen.py", b"a\nb\n");

        let options = ScanOptions::new().exclude("build/").record_events(true);
        let result = Scanner::new(temp.path(), &options).scan(&["build", "build/gen.py"]);

        assert_eq!(result.files_processed, 0);
        assert_eq!(
            result.events,
            vec![
                ScanEvent::Ignored("build".to_string()),
                ScanEvent::Ignored(rel(&["build", "gen.py"])),
            ]
        );
    }

    #[test]
    fn test_builtin_git_dir_skipped() {
        let temp = tempdir().unwrap();
        write(temp.path(), ".git/config", b"[core]\n");
        write(temp.path(), "app.py", b"pass\n");

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["."]);
        assert_eq!(result.processed_paths(), vec!["app.py"]);

        let options = ScanOptions::new().gitignore(GitignoreSource::Disabled);
        let result = Scanner::new(temp.path(), &options).scan(&["."]);
        assert_eq!(result.files_processed, 2);
    }

    #[test]
    fn test_nonexistent_target_warns() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", b"a\n");

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["nonexistent_dir", "a.py"]);

        assert_eq!(result.files_processed, 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::PathNotFound);
        assert!(result.warnings[0].message.contains("nonexistent_dir"));
    }

    #[test]
    fn test_target_outside_base() {
        let base = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        write(elsewhere.path(), "lib/x.py", b"x = 1\n");
        write(base.path(), ".gitignore", b"lib/\n");

        let result = Scanner::new(base.path(), &ScanOptions::new()).scan(&[elsewhere.path()]);

        // base patterns do not apply outside the base
        assert_eq!(result.files_processed, 1);
        let expected = fs::canonicalize(elsewhere.path()).unwrap().join("lib").join("x.py");
        assert_eq!(result.files[0].path, expected.display().to_string());
        let outside: Vec<_> = result
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::OutsideBase)
            .collect();
        assert_eq!(outside.len(), 1);
    }

    #[test]
    fn test_whitespace_option_reaches_counter() {
        let temp = tempdir().unwrap();
        write(temp.path(), "ws.txt", b"  \n\t\n");

        let off = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["ws.txt"]);
        let on = Scanner::new(temp.path(), &ScanOptions::new().count_whitespace_only(true))
            .scan(&["ws.txt"]);

        assert_eq!(off.total_loc, 0);
        assert_eq!(off.files_processed, 1);
        assert_eq!(on.total_loc, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        write(temp.path(), "real/a.py", b"a = 1\n");
        symlink(temp.path().join("real"), temp.path().join("alias")).unwrap();
        symlink(temp.path().join("missing"), temp.path().join("dangling")).unwrap();

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["."]);

        // the alias resolves to an already visited directory
        assert_eq!(result.files_processed, 1);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::UnsupportedEntry));
    }

    #[test]
    fn test_invalid_pattern_reported_on_every_scan() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", b"a = 1\n");

        let options = ScanOptions::new().exclude("a.py").exclude("[oops");
        let scanner = Scanner::new(temp.path(), &options);

        for _ in 0..2 {
            let result = scanner.scan(&["."]);
            assert_eq!(result.files_processed, 1);
            assert_eq!(result.warnings.len(), 1);
            assert_eq!(result.warnings[0].kind, WarningKind::PatternCompile);
        }
    }

    #[test]
    fn test_missing_gitignore_reported_in_results() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", b"a = 1\n");

        let options = ScanOptions::new().gitignore(GitignoreSource::File("nope/.gitignore".into()));
        let scanner = Scanner::new(temp.path(), &options);

        for _ in 0..2 {
            let result = scanner.scan(&["."]);
            assert_eq!(result.files_processed, 1);
            assert_eq!(result.warnings.len(), 1);
            assert_eq!(result.warnings[0].kind, WarningKind::GitignoreNotFound);
            assert!(result.warnings[0].message.contains("nope"));
        }
    }

    #[test]
    fn test_unreadable_directory_warns() {
        let temp = tempdir().unwrap();
        let scanner = Scanner::new(temp.path(), &ScanOptions::new());
        let mut traversal = Traversal {
            scanner: &scanner,
            visited: HashSet::new(),
            result: ScanResult::new(),
        };

        // removed between being seen and being listed
        let gone = temp.path().join("gone");
        traversal.visit_children(&gone, false);

        let warnings = traversal.result.warnings;
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::DirectoryRead);
        assert_eq!(warnings[0].path, gone);
        assert_eq!(traversal.result.files_processed, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_warns() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", b"a = 1\n");
        symlink("loop", temp.path().join("loop")).unwrap();

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["."]);
        assert_eq!(result.files_processed, 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::PathResolution);

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["loop"]);
        assert_eq!(result.files_processed, 0);
        assert_eq!(result.warnings[0].kind, WarningKind::PathResolution);
        assert_eq!(result.warnings[0].path, PathBuf::from("loop"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_exclude_applies_to_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempdir().unwrap();
        fs::write(temp.path().join(OsStr::from_bytes(b"caf\xe9.txt")), "x\n").unwrap();
        write(temp.path(), "plain.txt", b"y\n");

        let options = ScanOptions::new()
            .gitignore(GitignoreSource::Disabled)
            .exclude("*.txt");
        let result = Scanner::new(temp.path(), &options).scan(&["."]);

        assert_eq!(result.files_processed, 0);

        let result = Scanner::new(temp.path(), &ScanOptions::new()).scan(&["."]);
        assert_eq!(result.files_processed, 2);
    }

    #[test]
    fn test_display_path() {
        let base = Path::new("/base");
        assert_eq!(display_path(Path::new("/base"), base), ".");
        assert_eq!(display_path(Path::new("/other/x"), base), "/other/x");
    }
}
