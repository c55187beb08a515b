use crate::config::Config;
use crate::rules::{Context, Defect, Finding, Rule};
use crate::syntax::{SyntaxNode, SyntaxTree};
use crate::utils::LineIndex;
use std::path::PathBuf;

/// Every node of `tree`, root first, in source order.
fn walk(tree: &SyntaxTree) -> impl Iterator<Item = SyntaxNode> + '_ {
    std::iter::once(tree.root().clone()).chain(tree.root().descendants_all())
}

fn wants(rule: &dyn Rule, node: &SyntaxNode) -> bool {
    rule.kinds().contains(&node.kind())
}

/// Runs `rules` over one tree snapshot.
///
/// Defects come out in source order of their anchors; rules reporting on the
/// same node keep their registration order.
#[must_use]
pub fn detect(tree: &SyntaxTree, rules: &[Box<dyn Rule>]) -> Vec<Defect> {
    walk(tree)
        .flat_map(|node| {
            rules
                .iter()
                .filter(|rule| wants(rule.as_ref(), &node))
                .filter_map(|rule| rule.check(&node))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Visitor for traversing the syntax tree and applying linter rules.
pub struct LinterVisitor {
    rules: Vec<Box<dyn Rule>>,
    context: Context,
    /// Defects collected during the traversal, tied to the visited tree.
    pub defects: Vec<Defect>,
    /// List of findings collected during the traversal.
    pub findings: Vec<Finding>,
}

impl LinterVisitor {
    /// Creates a new `LinterVisitor` with the given rules and context.
    #[must_use]
    pub fn new(
        rules: Vec<Box<dyn Rule>>,
        filename: PathBuf,
        line_index: LineIndex,
        config: Config,
    ) -> Self {
        Self {
            rules,
            context: Context {
                filename,
                line_index,
                config,
            },
            defects: Vec::new(),
            findings: Vec::new(),
        }
    }

    /// Visits every node of `tree`.
    pub fn visit_tree(&mut self, tree: &SyntaxTree) {
        for node in walk(tree) {
            self.visit_node(&node);
        }
    }

    /// Applies the rules registered for the node's kind.
    pub fn visit_node(&mut self, node: &SyntaxNode) {
        for rule in &self.rules {
            if !wants(rule.as_ref(), node) {
                continue;
            }
            if let Some(defect) = rule.check(node) {
                self.findings
                    .push(Finding::from_defect(&defect, rule.metadata(), &self.context));
                self.defects.push(defect);
            }
        }
    }
}
