use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the per-project configuration file.
pub const CONFIG_FILENAME: &str = ".sharplint.toml";

/// Extension of the source files the linter picks up.
pub const SOURCE_EXTENSION: &str = "cs";

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV_VAR: &str = "SHARPLINT_LOG";

/// Comment markers that suppress findings on their line.
pub fn get_suppression_patterns() -> &'static [&'static str] {
    static PATTERNS: OnceLock<Vec<&'static str>> = OnceLock::new();
    PATTERNS.get_or_init(|| vec!["// sharplint: ignore", "// sharplint:ignore"])
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert(".vs");
        s.insert(".idea");
        s.insert("bin");
        s.insert("obj");
        s.insert("packages");
        s.insert("node_modules");
        s.insert("TestResults");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_suppression_patterns as SUPPRESSION_PATTERNS;
