//! Rendering scan results for the terminal

use std::str::FromStr;

use console::Style;
use locscanlib::{FileStats, ScanResult};

/// Width of the path column in the per-file listing
const NAME_WIDTH: usize = 60;
/// Width of the LOC column in the per-file listing
const CELL_WIDTH: usize = 10;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed `ScanResult`
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}

/// What the text renderer should include besides the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Print the per-path decisions before the summary
    pub verbose: bool,
    /// List processed files with their LOC after the summary
    pub by_file: bool,
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

/// Render the text report.
pub fn render_text(result: &ScanResult, options: TextOptions) -> String {
    let header = Style::new().bold();
    let mut out = String::new();

    if options.verbose {
        for event in &result.events {
            out.push_str(&event.to_string());
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        header.apply_to("--- LOC Count Summary ---")
    ));
    out.push_str(&format!("Total Lines of Code (LOC): {}\n", result.total_loc));
    out.push_str(&format!(
        "Total Files Processed:      {}\n",
        result.files_processed
    ));

    if options.by_file && !result.files.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", header.apply_to("Processed files:")));
        out.push_str(&render_file_rows(&result.files));
    }

    out
}

/// One row per file, sorted by path.
fn render_file_rows(files: &[FileStats]) -> String {
    let mut sorted: Vec<&FileStats> = files.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut out = String::new();
    for file in sorted {
        let name = truncate_name(&file.path, NAME_WIDTH - 2);
        out.push_str(&format!(
            "  {:<name_width$}{:>cell_width$}\n",
            name,
            file.loc,
            name_width = NAME_WIDTH,
            cell_width = CELL_WIDTH
        ));
    }
    out
}

/// Render the result as pretty JSON.
pub fn render_json(result: &ScanResult) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}
