use super::types::{AnalysisResult, AnalysisSummary, FileFixes, FileReport, ParseError};
use super::SharpLint;
use crate::cst::parse_source;
use crate::fix::{fix_all_filtered, FixOutcome};
use crate::linter::LinterVisitor;
use crate::rules::{enabled_rules, Defect};
use crate::syntax::SyntaxTree;
use crate::utils::{collect_source_files, get_ignored_lines, LineIndex};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Filter accepting the defects of `tree` whose line has no suppression
/// comment. The tree is rendered and indexed once, up front.
fn unsuppressed(tree: &SyntaxTree) -> impl Fn(&Defect) -> bool {
    let text = tree.text();
    let index = LineIndex::new(&text);
    let ignored = get_ignored_lines(&text);
    move |defect: &Defect| !ignored.contains(&index.line_index(defect.span.start()))
}

impl SharpLint {
    /// Analyzes files and directories.
    ///
    /// Directories are walked for `.cs` files; files are analyzed in
    /// parallel. With fixing enabled and no dry run, changed files are
    /// written back.
    ///
    /// # Errors
    /// Returns error if a path does not exist or a fixed file cannot be written
    pub fn analyze_paths(&mut self, paths: &[PathBuf]) -> Result<AnalysisResult> {
        let mut files = Vec::new();
        for path in paths {
            if !path.exists() {
                anyhow::bail!("Path does not exist: {}", path.display());
            }
            let (found, dirs) = collect_source_files(path, &self.exclude_folders, self.verbose);
            tracing::debug!(path = %path.display(), files = found.len(), dirs, "collected");
            files.extend(found);
        }
        files.sort();
        files.dedup();
        self.total_files_analyzed = files.len();

        let reports: Vec<FileReport> = files
            .par_iter()
            .map(|file| self.process_single_file(file))
            .collect();

        for report in &reports {
            if let (Some(fixes), Some(source)) = (&report.fixes, &report.fixed_source) {
                if fixes.written {
                    fs::write(&fixes.file, source).with_context(|| {
                        format!("Failed to write fixed source to {}", fixes.file.display())
                    })?;
                    tracing::info!(file = %fixes.file.display(), fixes = fixes.applied.len(), "fixed");
                }
            }
        }

        Ok(self.aggregate_results(reports))
    }

    /// Analyzes in-memory source as if it were the content of `file`.
    ///
    /// Nothing is written; the fixed text, if any, is returned in the report.
    #[must_use]
    pub fn analyze_source(&self, file: &Path, source: &str) -> FileReport {
        let mut report = self.process_source(file, source);
        if let Some(fixes) = &mut report.fixes {
            fixes.written = false;
        }
        report
    }

    fn process_single_file(&self, file: &Path) -> FileReport {
        match fs::read_to_string(file) {
            Ok(source) => self.process_source(file, &source),
            Err(e) => FileReport {
                parse_error: Some(ParseError {
                    file: file.to_path_buf(),
                    error: format!("Failed to read file: {e}"),
                }),
                ..FileReport::default()
            },
        }
    }

    fn process_source(&self, file: &Path, source: &str) -> FileReport {
        let tree = match parse_source(source) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(file = %file.display(), "{e}");
                return FileReport {
                    parse_error: Some(ParseError {
                        file: file.to_path_buf(),
                        error: e.to_string(),
                    }),
                    lines: source.lines().count(),
                    ..FileReport::default()
                };
            }
        };
        let rules = enabled_rules(&self.config);

        let (final_tree, fixes) = if self.fix {
            let FixOutcome { tree, applied, .. } =
                fix_all_filtered(&tree, &rules, unsuppressed);
            let fixes = (!applied.is_empty()).then(|| FileFixes {
                file: file.to_path_buf(),
                applied,
                written: !self.dry_run,
            });
            (tree, fixes)
        } else {
            (tree, None)
        };

        let text = final_tree.text();
        let ignored = get_ignored_lines(&text);
        let mut visitor = LinterVisitor::new(
            rules,
            file.to_path_buf(),
            LineIndex::new(&text),
            self.config.clone(),
        );
        visitor.visit_tree(&final_tree);
        let findings = visitor
            .findings
            .into_iter()
            .filter(|f| !ignored.contains(&f.line))
            .collect();

        FileReport {
            findings,
            fixed_source: fixes.is_some().then_some(text),
            fixes,
            parse_error: None,
            lines: source.lines().count(),
        }
    }

    fn aggregate_results(&mut self, reports: Vec<FileReport>) -> AnalysisResult {
        let mut findings = Vec::new();
        let mut fixes = Vec::new();
        let mut parse_errors = Vec::new();
        let mut total_lines = 0;

        for report in reports {
            total_lines += report.lines;
            findings.extend(report.findings);
            fixes.extend(report.fixes);
            parse_errors.extend(report.parse_error);
        }
        self.total_lines_analyzed = total_lines;

        let analysis_summary = AnalysisSummary {
            total_files: self.total_files_analyzed,
            total_lines_analyzed: total_lines,
            findings_count: findings.len(),
            fixes_applied: fixes.iter().map(|f: &FileFixes| f.applied.len()).sum(),
            files_changed: fixes.len(),
            parse_errors_count: parse_errors.len(),
        };

        AnalysisResult {
            findings,
            fixes,
            parse_errors,
            analysis_summary,
        }
    }
}
