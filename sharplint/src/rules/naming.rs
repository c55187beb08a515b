use super::ids::{CAT_NAMING, RULE_ID_NEGATED_BOOL, SEVERITY_WARNING};
use super::resolve::{declarator_identifier, declared_type, first_declarator};
use crate::rules::{Defect, Rule, RuleMetadata};
use crate::syntax::{SyntaxKind, SyntaxNode};

const META_NEGATED_BOOL: RuleMetadata = RuleMetadata {
    id: RULE_ID_NEGATED_BOOL,
    category: CAT_NAMING,
    severity: SEVERITY_WARNING,
    message: "Boolean variable '{0}' is named with a negative prefix",
};

/// Prefix that marks a negated boolean name, compared case-insensitively.
pub const NEGATIVE_PREFIX: &str = "not";

const PREFIX_CHARS: usize = 3;

/// Flags `bool notReady = ...;`.
///
/// Only declarations typed with the `bool` keyword itself are inspected
/// (`bool?`, `Boolean` and `var` are not), and only their first declarator.
pub struct NegatedBoolNameRule;

impl Rule for NegatedBoolNameRule {
    fn name(&self) -> &'static str {
        "NegatedBoolNameRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_NEGATED_BOOL
    }
    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::VariableDeclaration]
    }
    fn check(&self, node: &SyntaxNode) -> Option<Defect> {
        let ty = declared_type(node)?;
        if ty.kind() != SyntaxKind::PredefinedType || ty.token_text() != "bool" {
            return None;
        }
        let ident = declarator_identifier(&first_declarator(node)?)?;
        let name = ident.token_text();
        if !has_negative_prefix(name) {
            return None;
        }
        Some(Defect::new(RULE_ID_NEGATED_BOOL, node, vec![name.to_owned()]))
    }
}

/// Whether the first three characters of `name` spell `not`, in any casing.
///
/// Names shorter than three characters never match.
#[must_use]
pub fn has_negative_prefix(name: &str) -> bool {
    let prefix: String = name.chars().take(PREFIX_CHARS).collect();
    prefix.chars().count() == PREFIX_CHARS && prefix.eq_ignore_ascii_case(NEGATIVE_PREFIX)
}

/// `name` without its first three characters.
#[must_use]
pub fn strip_negative_prefix(name: &str) -> &str {
    name.char_indices()
        .nth(PREFIX_CHARS)
        .map_or("", |(i, _)| &name[i..])
}
