//! Built-in tables used when the caller does not override them.

/// Line prefixes that mark a whole line as a comment, for every file type.
pub const COMMENT_MARKERS: &[&str] = &["#", "//", "--", ";", "REM", "'"];

/// Whether whitespace-only lines count as code by default.
pub const COUNT_WHITESPACE_ONLY_LINES: bool = false;

/// Patterns that are always ignored unless gitignore processing is disabled.
pub const ESSENTIAL_PATTERNS: &[&str] = &[".git/", "__pycache__/"];

/// Common generated, vendored and tooling paths (opt-in).
pub const GENERATED_PATTERNS: &[&str] = &[
    // Version control
    ".git/",
    ".svn/",
    ".hg/",
    // Package management
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "Pipfile.lock",
    "composer.lock",
    "Gemfile.lock",
    "cargo.lock",
    // Build outputs
    "dist/",
    "build/",
    "out/",
    "target/",
    "*.min.js",
    "*.min.css",
    // IDE and tooling
    ".idea/",
    ".vscode/",
    ".vs/",
    "*.pyc",
    "__pycache__/",
    "*.pyo",
    "*.pyd",
    ".pytest_cache/",
    ".mypy_cache/",
    ".coverage",
    "coverage/",
    // Generated documentation
    "docs/_build/",
    "site/",
    "public/",
    // Source maps, type definitions, generated resources
    "*.map",
    "*.d.ts",
    "*.generated.*",
    "*.auto.*",
];

/// Extensions (with leading dot) and whole file names that are never counted.
///
/// Entries are lowercase; compound suffixes such as `.min.js` are matched
/// against every dot-suffix of a file name.
pub const EXCLUDED_NAMES: &[&str] = &[
    // Binaries and archives
    ".exe", ".dll", ".so", ".dylib", ".zip", ".tar", ".gz", ".7z", ".rar",
    // Images and documents
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".ico", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    // Databases and bytecode
    ".db", ".sqlite", ".sqlite3", ".class", ".jar", ".war", ".pyc", ".pyo", ".pyd",
    // Lock files, maps, minified assets
    ".lock", ".map", ".min.js", ".min.css",
    // Logs, temporaries, OS droppings
    ".log", ".tmp", ".temp", ".bak", ".swp", ".swo", ".ds_store", "thumbs.db",
    // Documentation and config
    ".md", ".gitignore",
];

/// Extensions that are counted without content sniffing.
pub const INCLUDED_EXTENSIONS: &[&str] = &[
    // Web
    ".js", ".ts", ".jsx", ".tsx", ".html", ".htm", ".css", ".scss", ".sass", ".less", ".vue",
    ".svelte",
    // Python
    ".py", ".pyi", ".pyx",
    // JVM
    ".java", ".kt", ".kts", ".scala",
    // C family
    ".c", ".cpp", ".h", ".hpp", ".cs", ".cshtml", ".csx",
    // Ruby, PHP, Go, Rust
    ".rb", ".erb", ".php", ".phtml", ".go", ".rs",
    // Shell
    ".sh", ".bash", ".zsh", ".bat", ".cmd", ".ps1",
    // Config and markup
    ".json", ".yaml", ".yml", ".toml", ".xml", ".rst", ".tex",
    // Other
    ".sql", ".r", ".m", ".swift", ".f90", ".pl", ".pm", ".t", ".lua", ".elm",
];

/// Bytes read from the start of a file when sniffing its content.
pub const SNIFF_SAMPLE_SIZE: usize = 1024;

/// Bytes of the sample that must decode as UTF-8.
pub const SNIFF_DECODE_WINDOW: usize = 512;

/// A sample whose share of bytes above 127 exceeds this ratio is binary.
pub const SNIFF_MAX_HIGH_BIT_RATIO: f64 = 0.30;
