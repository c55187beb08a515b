//! `SharpLint` analyzer module.
//!
//! This module contains the analysis driver, broken down into:
//! - `types`: Result types (`AnalysisResult`, `FileReport`, `ParseError`, `AnalysisSummary`)
//! - `processing`: File discovery, per-file linting and fixing, aggregation
//! - Core `SharpLint` struct and its builder methods

mod processing;
/// Result types and analysis summaries.
pub mod types;

pub use types::{AnalysisResult, AnalysisSummary, FileFixes, FileReport, ParseError};

use crate::config::Config;

/// The main analyzer struct.
/// Configuration options for the analysis are stored here.
pub struct SharpLint {
    /// Folders to exclude from analysis, on top of the defaults.
    pub exclude_folders: Vec<String>,
    /// Whether to apply fixes.
    pub fix: bool,
    /// Whether to compute fixes without writing them back.
    pub dry_run: bool,
    /// Total number of files analyzed.
    pub total_files_analyzed: usize,
    /// Total number of lines analyzed.
    pub total_lines_analyzed: usize,
    /// Configuration object.
    pub config: Config,
    /// Whether to enable verbose logging.
    pub verbose: bool,
}

impl Default for SharpLint {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SharpLint {
    /// Creates a new analyzer; file values (`exclude_folders`, `fix`) seed the options.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            exclude_folders: config.exclude_folders().to_vec(),
            fix: config.sharplint.fix.unwrap_or(false),
            dry_run: false,
            total_files_analyzed: 0,
            total_lines_analyzed: 0,
            config,
            verbose: false,
        }
    }

    /// Builder-style method to set verbose mode.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder-style method to enable fixing.
    #[must_use]
    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    /// Builder-style method to compute fixes without writing files.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builder-style method to add excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders.extend(folders);
        self
    }

    /// Builder-style method to ignore rule codes, on top of the configured ones.
    #[must_use]
    pub fn with_ignored_rules(mut self, rules: Vec<String>) -> Self {
        if !rules.is_empty() {
            self.config
                .sharplint
                .ignore
                .get_or_insert_with(Vec::new)
                .extend(rules);
        }
        self
    }
}
