use super::ids::{CAT_CODE_STYLE, RULE_ID_MISSING_TO_STRING, SEVERITY_WARNING};
use super::resolve::{chain_declares_method, member_name, resolve_receiver_class, TO_STRING};
use crate::rules::{Defect, Rule, RuleMetadata};
use crate::syntax::{SyntaxKind, SyntaxNode};

const META_MISSING_TO_STRING: RuleMetadata = RuleMetadata {
    id: RULE_ID_MISSING_TO_STRING,
    category: CAT_CODE_STYLE,
    severity: SEVERITY_WARNING,
    message: "'{0}' calls ToString() on a class that does not declare ToString()",
};

/// Flags `local.ToString()` when the local was created with `new T(...)` and
/// neither `T` nor any class it inherits from declares `ToString`.
///
/// Everything is matched by name, so calls whose receiver, declaration or
/// class cannot be found are skipped rather than reported.
pub struct MissingToStringRule;

impl Rule for MissingToStringRule {
    fn name(&self) -> &'static str {
        "MissingToStringRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_MISSING_TO_STRING
    }
    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MemberAccess]
    }
    fn check(&self, node: &SyntaxNode) -> Option<Defect> {
        if member_name(node)?.token_text() != TO_STRING {
            return None;
        }
        let target = resolve_receiver_class(node)?;
        if chain_declares_method(&target.class, TO_STRING) {
            return None;
        }
        Some(Defect::new(
            RULE_ID_MISSING_TO_STRING,
            node,
            vec![target.receiver],
        ))
    }
}
