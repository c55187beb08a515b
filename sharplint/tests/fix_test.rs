//! Tests for the fix module (TreeRewriter and the batch fixer).
#![allow(clippy::unwrap_used)]

use sharplint::cst::parse_source;
use sharplint::fix::{fix_all, Edit, EditBuilder, RewriteError, TreeRewriter, MAX_FIX_PASSES};
use sharplint::rules::all_rules;
use sharplint::syntax::{make, SyntaxKind, SyntaxNode, SyntaxTree};

fn identifier(tree: &SyntaxTree, name: &str) -> SyntaxNode {
    tree.root()
        .descendants(SyntaxKind::Identifier)
        .find(|i| i.token_text() == name)
        .unwrap()
}

#[test]
fn test_simple_replacement() {
    let tree = parse_source("class A { int a; }").unwrap();
    let mut rewriter = TreeRewriter::new(&tree);
    rewriter.add_edit(Edit::replace(&identifier(&tree, "a"), make::identifier("b")));
    assert_eq!(rewriter.edit_count(), 1);

    let result = rewriter.apply().expect("should apply");
    assert_eq!(result.text(), "class A { int b; }");
}

#[test]
fn test_builder_edits_apply_together() {
    let tree = parse_source("class A { int a; int b; }").unwrap();
    let edits = EditBuilder::new()
        .replace(&identifier(&tree, "a"), make::identifier("first"))
        .replace(&identifier(&tree, "b"), make::identifier("second"))
        .build();
    let mut rewriter = TreeRewriter::new(&tree);
    rewriter.add_edits(edits);

    let result = rewriter.apply().expect("should apply");
    assert_eq!(result.text(), "class A { int first; int second; }");
}

#[test]
fn test_validate_reports_overlap() {
    let tree = parse_source("class A { int a; }").unwrap();
    let class = tree.root().descendants(SyntaxKind::ClassDeclaration).next().unwrap();
    let mut rewriter = TreeRewriter::new(&tree);
    rewriter.add_edit(Edit::replace(&class, make::identifier("x")));
    rewriter.add_edit(Edit::replace(&identifier(&tree, "a"), make::identifier("b")));
    assert_eq!(
        rewriter.validate(),
        Err(RewriteError::OverlappingEdits { edit_a: 0, edit_b: 1 })
    );
}

#[test]
fn test_fix_all_is_stable() {
    let source = r"class Foo { int a; }
class Bar : Foo { int b; }
class P
{
    void M()
    {
        bool notFirst = true, notSecond = false;
        var bar = new Bar();
        bar.ToString();
        if (notFirst) { }
    }
}
";
    let tree = parse_source(source).unwrap();
    let outcome = fix_all(&tree, &all_rules());
    assert!(outcome.applied.len() < MAX_FIX_PASSES);
    assert!(outcome.remaining.is_empty());
    let text = outcome.tree.text();
    assert!(text.contains("bool First = true, notSecond = false;"));
    assert!(text.contains("if (!First)"));
    assert!(text.contains(r#"class Bar : Foo { int b; public override string ToString() { return $"b: {b}"; } }"#));

    // running the fixer again changes nothing
    let again = fix_all(&outcome.tree, &all_rules());
    assert!(!again.changed());
    assert_eq!(again.tree.text(), text);
}
