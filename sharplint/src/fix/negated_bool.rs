//! Renames `bool notX` to `bool X` and negates every use.
//!
//! Uses are found by spelling, not by scope: every identifier token in the
//! file whose text equals the old name becomes `!X`, including same-named
//! variables used elsewhere. A second declaration of the old name (local,
//! field or parameter) makes the fix fail, since `bool !X` would not parse.

use std::sync::Arc;

use super::rewriter::{Edit, EditBuilder, TreeRewriter};
use super::FixError;
use crate::rules::ids::RULE_ID_NEGATED_BOOL;
use crate::rules::naming::{has_negative_prefix, strip_negative_prefix};
use crate::rules::resolve::{declarator_identifier, declared_type, first_declarator, initializer, is_literal};
use crate::rules::Defect;
use crate::syntax::{make, GreenNode, SyntaxKind, SyntaxNode, SyntaxTree};

const BOOL_KEYWORD: &str = "bool";

fn malformed(reason: impl Into<String>) -> FixError {
    FixError::malformed(RULE_ID_NEGATED_BOOL, reason)
}

/// Whether `token` is the name a declarator or parameter introduces.
fn is_declared_name(token: &SyntaxNode) -> bool {
    let Some(parent) = token.parent() else {
        return false;
    };
    let name = match parent.kind() {
        SyntaxKind::VariableDeclarator => parent.identifier(),
        // last name before any default value; a plain-name type comes first
        SyntaxKind::Parameter => parent
            .children()
            .take_while(|c| !(c.kind() == SyntaxKind::Punctuation && c.token_text() == "="))
            .filter(|c| c.kind() == SyntaxKind::Identifier)
            .last(),
        _ => None,
    };
    name.is_some_and(|n| n == *token)
}

/// Applies the boolean-prefix fix for `defect` to `tree`.
pub(super) fn apply(tree: &SyntaxTree, defect: &Defect) -> Result<SyntaxTree, FixError> {
    let declaration = tree
        .covering(SyntaxKind::VariableDeclaration, defect.span)
        .map_err(|e| malformed(e.to_string()))?;

    let is_bool = declared_type(&declaration)
        .is_some_and(|ty| ty.kind() == SyntaxKind::PredefinedType && ty.token_text() == BOOL_KEYWORD);
    if !is_bool {
        return Err(malformed("declaration is not typed `bool`"));
    }
    let declarator = first_declarator(&declaration).ok_or_else(|| malformed("no declarator"))?;
    let ident = declarator_identifier(&declarator).ok_or_else(|| malformed("declarator has no name"))?;
    let old_name = ident.token_text().to_owned();
    if !has_negative_prefix(&old_name) {
        return Err(malformed(format!("`{old_name}` has no negative prefix")));
    }
    let new_name = strip_negative_prefix(&old_name);
    if !new_name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
    {
        return Err(malformed(format!(
            "`{old_name}` does not leave a valid name once the prefix is removed"
        )));
    }
    let init = initializer(&declarator)
        .filter(is_literal)
        .ok_or_else(|| malformed(format!("`{old_name}` is not initialized with a literal")))?;

    // declarators after the first keep their separators and trivia
    let rest: Vec<Arc<GreenNode>> = declaration
        .children()
        .skip(declarator.index() + 1)
        .map(|c| Arc::clone(c.green()))
        .collect();
    let replacement = make::variable_declaration(
        BOOL_KEYWORD,
        &make::variable_declarator(new_name, Some(init.green())),
        rest,
    );

    let mut rewriter = TreeRewriter::new(tree);
    rewriter.add_edit(Edit::with_description(
        &declaration,
        replacement,
        format!("rename `{old_name}` to `{new_name}`"),
    ));
    let renamed = rewriter.apply()?;

    let uses: Vec<_> = renamed
        .root()
        .descendants(SyntaxKind::Identifier)
        .filter(|t| t.token_text() == old_name)
        .collect();
    if uses.iter().any(is_declared_name) {
        return Err(malformed(format!("`{old_name}` is declared more than once")));
    }
    tracing::debug!(old = %old_name, new = %new_name, uses = uses.len(), "negating uses");

    let mut rewriter = TreeRewriter::new(&renamed);
    rewriter.add_edits(
        EditBuilder::new()
            .replace_each(uses, &make::negation(new_name))
            .build(),
    );
    Ok(rewriter.apply()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;
    use crate::rules::naming::NegatedBoolNameRule;
    use crate::rules::Rule;

    fn first_defect(tree: &SyntaxTree) -> Defect {
        tree.root()
            .descendants(SyntaxKind::VariableDeclaration)
            .find_map(|d| NegatedBoolNameRule.check(&d))
            .unwrap()
    }

    fn fix(source: &str) -> Result<String, FixError> {
        let tree = parse_source(source).unwrap();
        apply(&tree, &first_defect(&tree)).map(|t| t.text())
    }

    #[test]
    fn test_renames_and_negates_uses() {
        let fixed = fix("class A { void M() { bool notAvailable = false; if (notAvailable) { } } }").unwrap();
        assert_eq!(
            fixed,
            "class A { void M() { bool Available = false; if (!Available) { } } }"
        );
    }

    #[test]
    fn test_keeps_trailing_declarators() {
        let fixed = fix("class A { void M() { bool notA = true, b = notA; } }").unwrap();
        assert_eq!(fixed, "class A { void M() { bool A = true, b = !A; } }");
    }

    #[test]
    fn test_strings_and_comments_are_not_uses() {
        let fixed = fix(
            "class A { void M() { bool notOk = true; // notOk\n var s = \"notOk\"; } }",
        )
        .unwrap();
        assert_eq!(
            fixed,
            "class A { void M() { bool Ok = true; // notOk\n var s = \"notOk\"; } }"
        );
    }

    #[test]
    fn test_requires_literal_initializer() {
        let err = fix("class A { void M(bool x) { bool notA = x; } }").unwrap_err();
        assert!(matches!(err, FixError::MalformedInput { .. }));
        let err = fix("class A { bool notA; }").unwrap_err();
        assert!(matches!(err, FixError::MalformedInput { .. }));
    }

    #[test]
    fn test_requires_usable_new_name() {
        let err = fix("class A { void M() { bool not = true; } }").unwrap_err();
        assert!(matches!(err, FixError::MalformedInput { .. }));
        let err = fix("class A { void M() { bool not1 = true; } }").unwrap_err();
        assert!(matches!(err, FixError::MalformedInput { .. }));
    }

    #[test]
    fn test_second_declaration_blocks_rename() {
        for source in [
            "class A { void M1() { bool notA = true; } void M2() { bool notA = false; } }",
            "class A { void M1() { bool notA = true; } void M2(bool notA) { } }",
            "class A { void M1() { bool notA = true; } void M2(Foo notA) { } }",
            "class A { bool notA = true; void M(bool notA = false) { } }",
        ] {
            let err = fix(source).unwrap_err();
            assert!(matches!(err, FixError::MalformedInput { .. }), "{source}");
        }
        // a use in another method is still negated
        let fixed = fix("class A { void M1() { bool notA = true; } bool M2() { return notA; } }").unwrap();
        assert_eq!(
            fixed,
            "class A { void M1() { bool A = true; } bool M2() { return !A; } }"
        );
    }

    #[test]
    fn test_stale_defect_is_rejected() {
        let tree = parse_source("class A { void M() { bool notA = true; } }").unwrap();
        let defect = first_defect(&tree);
        let other = parse_source("class A { void M() { int x = 1; } }").unwrap();
        assert!(matches!(
            apply(&other, &defect),
            Err(FixError::MalformedInput { .. })
        ));
    }
}
