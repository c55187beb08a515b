//! Autofix engine.
//!
//! A fix consumes one [`Defect`] and the tree it was found in, and returns a
//! new tree; the input tree is left untouched. Fixes re-resolve their anchor
//! from the defect's kind and span, so a defect found in some other snapshot
//! is rejected instead of being applied to the wrong node.
//!
//! - boolean-prefix fix: `bool notX = lit;` becomes `bool X = lit;` and every
//!   identifier spelled `notX` becomes `!X`
//! - `ToString` synthesis: the receiver's class gains
//!   `public override string ToString()` listing its fields
//!
//! [`fix_all`] repeats detect-then-fix on one file until nothing fixable is
//! left. Node replacement itself goes through [`TreeRewriter`].

mod negated_bool;
mod rewriter;
mod to_string;

use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

pub use rewriter::{Edit, EditBuilder, RewriteError, TreeRewriter};
pub use to_string::template_parts;

use crate::linter::detect;
use crate::rules::ids::{RULE_ID_MISSING_TO_STRING, RULE_ID_NEGATED_BOOL};
use crate::rules::resolve::resolve_receiver_class;
use crate::rules::{Defect, Rule};
use crate::syntax::{SyntaxNode, SyntaxTree};

/// Upper bound on detect-then-fix rounds for one file.
///
/// The boolean-prefix fix renames by spelling. It refuses to run when the
/// old name is declared a second time in the file, since negating that
/// declaration's name would not parse.
pub const MAX_FIX_PASSES: usize = 256;

/// Error raised by a fix.
#[derive(Debug, Error)]
pub enum FixError {
    /// The anchor does not have the shape its rule guarantees.
    #[error("{rule_id}: malformed input: {reason}")]
    MalformedInput {
        /// Rule whose fix failed.
        rule_id: &'static str,
        /// What did not match.
        reason: String,
    },
    /// No fix is registered for the rule.
    #[error("no fix available for rule {0}")]
    UnknownRule(String),
    /// The rewriter rejected the produced edits.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

impl FixError {
    pub(crate) fn malformed(rule_id: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            rule_id,
            reason: reason.into(),
        }
    }
}

/// Whether a fix exists for `rule_id`.
#[must_use]
pub fn has_fix(rule_id: &str) -> bool {
    rule_id == RULE_ID_NEGATED_BOOL || rule_id == RULE_ID_MISSING_TO_STRING
}

/// Applies the fix for one defect, returning the new tree.
///
/// # Errors
/// Returns [`FixError::MalformedInput`] if the defect does not resolve
/// against `tree` to the shape its rule reports, and
/// [`FixError::UnknownRule`] for rules without a fix.
pub fn apply_fix(tree: &SyntaxTree, defect: &Defect) -> Result<SyntaxTree, FixError> {
    match defect.rule_id {
        RULE_ID_NEGATED_BOOL => negated_bool::apply(tree, defect),
        RULE_ID_MISSING_TO_STRING => to_string::apply(tree, defect),
        other => Err(FixError::UnknownRule(other.to_owned())),
    }
}

/// One fix applied by [`fix_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFix {
    /// Rule whose defect was fixed.
    pub rule_id: &'static str,
    /// Arguments of the fixed defect.
    pub arguments: Vec<String>,
}

/// Result of fixing one file.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// Final tree.
    pub tree: SyntaxTree,
    /// Fixes in the order they were applied.
    pub applied: Vec<AppliedFix>,
    /// Defects still present in the final tree.
    pub remaining: Vec<Defect>,
}

impl FixOutcome {
    /// Whether any fix changed the tree.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Site a fix rewrites, identified by child indices from the root.
///
/// Fixes replace nodes in place, so the path of a site survives the fixes
/// applied elsewhere in the file while byte offsets do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FixSite {
    rule_id: &'static str,
    path: Vec<usize>,
    arguments: Vec<String>,
}

fn node_path(node: &SyntaxNode) -> Vec<usize> {
    let mut path: Vec<usize> = node
        .ancestors_and_self()
        .filter(|n| n.parent().is_some())
        .map(|n| n.index())
        .collect();
    path.reverse();
    path
}

impl FixSite {
    /// The class gaining `ToString`, or the declaration being renamed.
    fn of(defect: &Defect) -> Self {
        let target = if defect.rule_id == RULE_ID_MISSING_TO_STRING {
            resolve_receiver_class(&defect.anchor).map(|r| r.class)
        } else {
            None
        };
        Self {
            rule_id: defect.rule_id,
            path: node_path(target.as_ref().unwrap_or(&defect.anchor)),
            arguments: defect.arguments.clone(),
        }
    }
}

/// Fixes every fixable defect of `tree`.
///
/// Each round re-runs detection on the current tree and applies the first
/// defect not yet given up on. A defect is given up on when its fix fails or
/// when the same site is reported again after its fix; the loop ends when no
/// candidate is left or after [`MAX_FIX_PASSES`] rounds.
#[must_use]
pub fn fix_all(tree: &SyntaxTree, rules: &[Box<dyn Rule>]) -> FixOutcome {
    fix_all_filtered(tree, rules, |_| |_: &Defect| true)
}

/// Like [`fix_all`], but only defects accepted by a filter are fixed or
/// reported as remaining.
///
/// `filter_for` is called once per tree snapshot and returns the filter
/// for the defects found in that snapshot.
#[must_use]
pub fn fix_all_filtered<F, K>(tree: &SyntaxTree, rules: &[Box<dyn Rule>], filter_for: F) -> FixOutcome
where
    F: Fn(&SyntaxTree) -> K,
    K: Fn(&Defect) -> bool,
{
    let mut current = tree.clone();
    let mut applied: Vec<AppliedFix> = Vec::new();
    let mut done: FxHashSet<FixSite> = FxHashSet::default();
    let mut given_up: FxHashSet<FixSite> = FxHashSet::default();

    for pass in 0..MAX_FIX_PASSES {
        let keep = filter_for(&current);
        let candidate = detect(&current, rules)
            .into_iter()
            .filter(|d| has_fix(d.rule_id) && keep(d))
            .map(|d| (FixSite::of(&d), d))
            .find(|(site, _)| !given_up.contains(site));
        let Some((key, defect)) = candidate else {
            break;
        };
        if done.contains(&key) {
            tracing::warn!(rule = defect.rule_id, args = ?defect.arguments, "defect survived its fix");
            given_up.insert(key);
            continue;
        }
        match apply_fix(&current, &defect) {
            Ok(next) => {
                tracing::debug!(pass, rule = defect.rule_id, args = ?defect.arguments, "applied fix");
                current = next;
                applied.push(AppliedFix {
                    rule_id: defect.rule_id,
                    arguments: defect.arguments,
                });
                done.insert(key);
            }
            Err(e) => {
                tracing::warn!("skipping fix: {e}");
                given_up.insert(key);
            }
        }
    }

    let keep = filter_for(&current);
    let remaining = detect(&current, rules).into_iter().filter(|d| keep(d)).collect();
    FixOutcome {
        tree: current,
        applied,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;
    use crate::rules::all_rules;

    #[test]
    fn test_unknown_rule_is_rejected() {
        let tree = parse_source("class A { }").unwrap();
        let defect = Defect::new("SL-X999", tree.root(), Vec::new());
        assert!(matches!(
            apply_fix(&tree, &defect),
            Err(FixError::UnknownRule(id)) if id == "SL-X999"
        ));
    }

    #[test]
    fn test_fix_all_handles_both_rules() {
        let source = r"class Foo { int a; }
class P {
    void M() {
        bool notReady = false;
        var foo = new Foo();
        if (notReady) { foo.ToString(); }
    }
}";
        let tree = parse_source(source).unwrap();
        let outcome = fix_all(&tree, &all_rules());
        assert_eq!(outcome.applied.len(), 2);
        assert!(outcome.remaining.is_empty());
        let text = outcome.tree.text();
        assert!(text.contains("bool Ready = false;"));
        assert!(text.contains("if (!Ready)"));
        assert!(text.contains(r#"return $"a: {a}";"#));
        assert_eq!(tree.text(), source);
    }

    #[test]
    fn test_unfixable_defects_remain() {
        let source = "class P { void M(bool x) { bool notA = x; } }";
        let tree = parse_source(source).unwrap();
        let outcome = fix_all(&tree, &all_rules());
        assert!(!outcome.changed());
        assert_eq!(outcome.remaining.len(), 1);
        assert_eq!(outcome.tree.text(), source);
    }

    #[test]
    fn test_filtered_defects_are_left_alone() {
        let source = "class P { void M() { bool notA = true; bool notB = false; } }";
        let tree = parse_source(source).unwrap();
        let outcome = fix_all_filtered(&tree, &all_rules(), |_| |d: &Defect| d.arguments[0] != "notA");
        assert_eq!(
            outcome.tree.text(),
            "class P { void M() { bool notA = true; bool B = false; } }"
        );
        assert!(outcome.remaining.is_empty());
    }

    #[test]
    fn test_same_receiver_name_in_two_methods() {
        let source = "class A { int a; } class B { int b; } \
class P { void M1() { var x = new A(); x.ToString(); } void M2() { var x = new B(); x.ToString(); } }";
        let tree = parse_source(source).unwrap();
        let outcome = fix_all(&tree, &all_rules());
        assert_eq!(outcome.applied.len(), 2);
        assert!(outcome.remaining.is_empty());
        let text = outcome.tree.text();
        assert!(text.contains(r#"class A { int a; public override string ToString() { return $"a: {a}"; } }"#));
        assert!(text.contains(r#"class B { int b; public override string ToString() { return $"b: {b}"; } }"#));
    }

    #[test]
    fn test_name_declared_twice_is_not_renamed() {
        let source = "class P { void M1() { bool notA = true; } void M2() { bool notA = false; } }";
        let tree = parse_source(source).unwrap();
        let outcome = fix_all(&tree, &all_rules());
        assert!(!outcome.changed());
        assert_eq!(outcome.remaining.len(), 2);
        assert_eq!(outcome.tree.text(), source);
    }

    #[test]
    fn test_nested_prefix_is_stripped_repeatedly() {
        let tree = parse_source("class P { void M() { bool notnotA = true; } }").unwrap();
        let outcome = fix_all(&tree, &all_rules());
        assert_eq!(outcome.applied.len(), 2);
        assert_eq!(
            outcome.tree.text(),
            "class P { void M() { bool A = true; } }"
        );
    }
}
