use crate::config::Config;
use crate::syntax::{SyntaxKind, SyntaxNode, TextRange};
use crate::utils::LineIndex;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
/// Context used when turning defects into reportable findings.
pub struct Context {
    /// Path to the file being analyzed.
    pub filename: PathBuf,
    /// Line index for accurate line/column mapping.
    pub line_index: LineIndex,
    /// Configuration settings.
    pub config: Config,
}

#[derive(Debug, Clone, Serialize)]
/// A rule's finding on one tree snapshot.
///
/// The anchor is only meaningful for the tree it was found in. The fix
/// engine re-resolves it from `anchor_kind` and `span`, so a defect must be
/// discarded once its tree has been edited.
pub struct Defect {
    /// ID of the rule that produced the defect.
    pub rule_id: &'static str,
    /// Node the defect points at.
    #[serde(skip)]
    pub anchor: SyntaxNode,
    /// Kind of the anchor node.
    pub anchor_kind: SyntaxKind,
    /// Span of the anchor node, trivia excluded.
    pub span: TextRange,
    /// Message arguments (offending identifier).
    pub arguments: Vec<String>,
}

impl Defect {
    /// Creates a defect anchored at `anchor`.
    #[must_use]
    pub fn new(rule_id: &'static str, anchor: &SyntaxNode, arguments: Vec<String>) -> Self {
        Self {
            rule_id,
            anchor: anchor.clone(),
            anchor_kind: anchor.kind(),
            span: anchor.span(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single issue found by a rule, ready for reporting.
pub struct Finding {
    /// ID of the rule that triggered the finding.
    pub rule_id: String,
    /// Category of the rule.
    pub category: String,
    /// Severity level (e.g., "WARNING").
    pub severity: String,
    /// Description of the issue.
    pub message: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number.
    pub line: usize,
    /// Column number.
    pub col: usize,
}

impl Finding {
    /// Builds a finding for `defect` using the metadata of the rule that produced it.
    #[must_use]
    pub fn from_defect(defect: &Defect, meta: RuleMetadata, context: &Context) -> Self {
        let (line, col) = context.line_index.line_col(defect.span.start());
        Self {
            rule_id: meta.id.to_owned(),
            category: meta.category.to_owned(),
            severity: meta.severity.to_owned(),
            message: meta.format_message(&defect.arguments),
            file: context.filename.clone(),
            line,
            col,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
    /// Severity reported for its findings.
    pub severity: &'static str,
    /// Message template; `{0}` is replaced with the first argument.
    pub message: &'static str,
}

impl RuleMetadata {
    /// Renders the message template with the defect arguments.
    #[must_use]
    pub fn format_message(&self, arguments: &[String]) -> String {
        arguments
            .iter()
            .enumerate()
            .fold(self.message.to_owned(), |msg, (i, arg)| {
                msg.replace(&format!("{{{i}}}"), arg)
            })
    }
}

/// Trait defining a linting rule.
///
/// Rules are pure: `check` only reads the node and its tree, so one rule
/// instance can inspect many trees from many threads at once.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the unique code/ID of the rule.
    fn code(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the category/functional group of the rule.
    fn category(&self) -> &'static str {
        self.metadata().category
    }
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Node kinds the rule wants to see.
    fn kinds(&self) -> &'static [SyntaxKind];
    /// Inspects one node of a requested kind.
    fn check(&self, node: &SyntaxNode) -> Option<Defect>;
}

/// Returns every built-in rule, in registration order.
#[must_use]
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(naming::NegatedBoolNameRule),
        Box::new(coverage::MissingToStringRule),
    ]
}

/// Returns the built-in rules whose ids are not ignored by `config`.
#[must_use]
pub fn enabled_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let ignored = config.ignored_rules();
    all_rules()
        .into_iter()
        .filter(|rule| !ignored.iter().any(|id| id == rule.code()))
        .collect()
}

/// Module containing the `ToString` coverage rule.
pub mod coverage;
/// Module containing rule ID constants.
pub mod ids;
/// Module containing the boolean naming rule.
pub mod naming;
/// Module containing the syntactic name and type resolution helpers.
pub mod resolve;
