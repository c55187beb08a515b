//! Type definitions for analysis results.

use crate::fix::AppliedFix;
use crate::rules::Finding;
use serde::Serialize;

/// Represents a file that could not be read or parsed.
#[derive(Debug, Serialize, Clone)]
pub struct ParseError {
    /// The file where the error occurred.
    pub file: std::path::PathBuf,
    /// The error message.
    pub error: String,
}

/// Fixes applied to one file.
#[derive(Debug, Serialize, Clone)]
pub struct FileFixes {
    /// The fixed file.
    pub file: std::path::PathBuf,
    /// Fixes in the order they were applied.
    pub applied: Vec<AppliedFix>,
    /// Whether the fixed source was written back (false in dry-run mode).
    pub written: bool,
}

/// Outcome of analyzing a single file.
#[derive(Debug, Default)]
pub struct FileReport {
    /// Findings on the final source (after fixes when fixing).
    pub findings: Vec<Finding>,
    /// Fixes applied, if any.
    pub fixes: Option<FileFixes>,
    /// Read or parse failure.
    pub parse_error: Option<ParseError>,
    /// Number of lines in the analyzed source.
    pub lines: usize,
    /// Fixed source text, when it differs from the input.
    pub fixed_source: Option<String>,
}

/// Holds the results of the analysis.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    /// Findings still present after the run.
    pub findings: Vec<Finding>,
    /// Files changed by fixes.
    pub fixes: Vec<FileFixes>,
    /// List of parse errors encountered.
    pub parse_errors: Vec<ParseError>,
    /// Summary statistics of the analysis.
    pub analysis_summary: AnalysisSummary,
}

/// Summary statistics for the analysis result.
#[derive(Debug, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Total number of files scanned.
    pub total_files: usize,
    /// Total number of lines analyzed.
    pub total_lines_analyzed: usize,
    /// Number of findings still present.
    pub findings_count: usize,
    /// Number of fixes applied across all files.
    pub fixes_applied: usize,
    /// Number of files whose source changed.
    pub files_changed: usize,
    /// Total number of parse errors found.
    pub parse_errors_count: usize,
}
