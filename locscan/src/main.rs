//! # locscan
//!
//! A CLI tool for counting lines of code across a file tree, honoring
//! gitignore-style exclusion rules.
//!
//! ## Overview
//!
//! locscan is built on top of locscanlib. It resolves targets against the
//! current directory, loads `./.gitignore` unless told otherwise, skips
//! binary and non-code files, and prints the total LOC and the number of
//! files counted.
//!
//! ## Features
//!
//! - **Gitignore-aware**: auto-detects `.gitignore`, or takes an explicit file
//! - **Extra excludes**: repeatable `--exclude` patterns override the gitignore file
//! - **Verbose mode**: prints every per-path decision
//! - **Multiple output formats**: text summary (default), JSON
//! - **Remote repositories**: `--repo` scans a shallow clone
//!
//! ## Usage
//!
//! ```bash
//! # Count LOC in the current directory, using ./.gitignore if it exists
//! locscan .
//!
//! # Count LOC in 'src', excluding all '.log' files and the 'build' directory
//! locscan src --exclude "*.log" --exclude "build/"
//!
//! # Ignore any .gitignore and the built-in patterns, only use excludes
//! locscan src --exclude "*.tmp" --gitignore ""
//!
//! # Scan a remote repository
//! locscan --repo https://github.com/owner/project
//! ```

mod remote;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use locscanlib::{GitignoreSource, ScanOptions, Scanner};
use tracing_subscriber::EnvFilter;

use render::{OutputMode, TextOptions};

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("locscan")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Count lines of code in files and directories, respecting gitignore patterns")
        .after_help(
            "Examples:\n  \
             locscan .\n  \
             locscan src/main.py src/utils.py tests/\n  \
             locscan src --exclude \"*.log\" --exclude \"build/\"\n  \
             locscan project --gitignore project/.custom_ignore\n  \
             locscan src --exclude \"*.tmp\" --gitignore \"\"",
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .num_args(1..)
                .action(ArgAction::Append)
                .required_unless_present("repo")
                .help("One or more file or directory paths to scan"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Gitignore-style pattern to exclude (can be specified multiple times)"),
        )
        .arg(
            Arg::new("gitignore")
                .long("gitignore")
                .value_name("FILE")
                .help("Path to a specific .gitignore file; pass \"\" to disable gitignore and built-in patterns"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print every file and directory decision"),
        )
        .arg(
            Arg::new("count-whitespace")
                .long("count-whitespace")
                .action(ArgAction::SetTrue)
                .help("Count lines containing only whitespace"),
        )
        .arg(
            Arg::new("skip-generated")
                .long("skip-generated")
                .action(ArgAction::SetTrue)
                .help("Also ignore common generated, vendored and tooling files"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("List processed files with their LOC"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("MODE")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("repo")
                .long("repo")
                .value_name("URL")
                .help("Shallow-clone a remote repository and scan it (paths default to \".\")"),
        )
}

/// Build scan options from matches
fn scan_options(matches: &ArgMatches) -> ScanOptions {
    let excludes: Vec<String> = matches
        .get_many::<String>("exclude")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let gitignore = matches.get_one::<String>("gitignore").map(String::as_str);

    ScanOptions::new()
        .gitignore(GitignoreSource::from_cli(gitignore))
        .exclude_many(&excludes)
        .count_whitespace_only(matches.get_flag("count-whitespace"))
        .generated_patterns(matches.get_flag("skip-generated"))
        .record_events(matches.get_flag("verbose"))
}

/// Extract targets from matches
fn extract_targets(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<String>("paths")
        .map(|v| v.map(PathBuf::from).collect())
        .unwrap_or_else(|| vec![PathBuf::from(".")])
}

/// Run a scan and render its output
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let options = scan_options(matches);
    let targets = extract_targets(matches);

    // kept alive until the scan is done, the tree is removed on drop
    let checkout = match matches.get_one::<String>("repo") {
        Some(url) => Some(remote::clone_shallow(url)?),
        None => None,
    };
    let base_dir = match &checkout {
        Some(checkout) => checkout.root().to_path_buf(),
        None => std::env::current_dir().context("could not determine the current directory")?,
    };

    let result = Scanner::new(&base_dir, &options).scan(&targets);

    let mode = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    match mode {
        OutputMode::Json => Ok(render::render_json(&result)?),
        OutputMode::Text => Ok(render::render_text(
            &result,
            TextOptions {
                verbose: matches.get_flag("verbose"),
                by_file: matches.get_flag("by-file"),
            },
        )),
    }
}

/// Send log records to stderr, filtered by `RUST_LOG`
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
