//! Read-only traversals over a syntax tree.
//!
//! All traversals are lazy, deterministic (source order) and restartable:
//! calling them twice walks the same nodes in the same order.

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::{SyntaxKind, SyntaxNode};

/// A structural lookup found nothing.
///
/// Rules treat this as "does not apply"; it is never a fault on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The offset lies outside the tree.
    #[error("no node at offset {offset:?}")]
    NotFound {
        /// Offset that was looked up.
        offset: TextSize,
    },
    /// No node of the requested kind covers the requested span.
    #[error("no {kind:?} node spans {span:?}")]
    NoMatch {
        /// Requested kind.
        kind: SyntaxKind,
        /// Requested span.
        span: TextRange,
    },
}

/// Depth-first, pre-order walk over the strict descendants of a node.
pub struct Preorder {
    stack: Vec<SyntaxNode>,
}

impl Preorder {
    fn new(node: &SyntaxNode) -> Self {
        let mut stack: Vec<SyntaxNode> = node.children().collect();
        stack.reverse();
        Self { stack }
    }
}

impl Iterator for Preorder {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        let node = self.stack.pop()?;
        let depth = self.stack.len();
        self.stack.extend(node.children());
        self.stack[depth..].reverse();
        Some(node)
    }
}

impl SyntaxNode {
    /// Every descendant, pre-order. The node itself is excluded.
    #[must_use]
    pub fn descendants_all(&self) -> Preorder {
        Preorder::new(self)
    }

    /// Descendants of the given kind, pre-order.
    pub fn descendants(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
        self.descendants_all().filter(move |n| n.kind() == kind)
    }

    /// Leaves below this node, in source order.
    pub fn descendant_tokens(&self) -> impl Iterator<Item = SyntaxNode> {
        self.descendants_all().filter(SyntaxNode::is_token)
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(self.parent(), SyntaxNode::parent)
    }

    /// This node, then its ancestors.
    pub fn ancestors_and_self(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(Some(self.clone()), SyntaxNode::parent)
    }

    /// First identifier token among the direct children.
    #[must_use]
    pub fn identifier(&self) -> Option<SyntaxNode> {
        self.first_child_of_kind(SyntaxKind::Identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{GreenNode, SyntaxTree};

    // class C { int a; int b; }
    fn class_tree() -> SyntaxTree {
        let field = |name: &str| {
            GreenNode::node(
                SyntaxKind::FieldDeclaration,
                [
                    GreenNode::node(
                        SyntaxKind::VariableDeclaration,
                        [
                            GreenNode::token(SyntaxKind::PredefinedType, " ", "int"),
                            GreenNode::node(
                                SyntaxKind::VariableDeclarator,
                                [GreenNode::token(SyntaxKind::Identifier, " ", name)],
                            ),
                        ],
                    ),
                    GreenNode::token(SyntaxKind::Punctuation, "", ";"),
                ],
            )
        };
        let body = GreenNode::node(
            SyntaxKind::DeclarationList,
            [
                GreenNode::token(SyntaxKind::Punctuation, " ", "{"),
                field("a"),
                field("b"),
                GreenNode::token(SyntaxKind::Punctuation, " ", "}"),
            ],
        );
        SyntaxTree::new(GreenNode::node(
            SyntaxKind::CompilationUnit,
            [GreenNode::node(
                SyntaxKind::ClassDeclaration,
                [
                    GreenNode::token(SyntaxKind::Keyword, "", "class"),
                    GreenNode::token(SyntaxKind::Identifier, " ", "C"),
                    body,
                ],
            )],
        ))
    }

    #[test]
    fn test_descendants_in_source_order() {
        let tree = class_tree();
        let names: Vec<String> = tree
            .root()
            .descendants(SyntaxKind::VariableDeclarator)
            .map(|d| d.text())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_descendants_are_restartable() {
        let tree = class_tree();
        let first: Vec<_> = tree.root().descendants_all().collect();
        let second: Vec<_> = tree.root().descendants_all().collect();
        assert_eq!(first, second);
        assert_eq!(first[0].kind(), SyntaxKind::ClassDeclaration);
    }

    #[test]
    fn test_descendants_exclude_self() {
        let tree = class_tree();
        let class = tree.root().descendants(SyntaxKind::ClassDeclaration).next().unwrap();
        assert_eq!(class.descendants(SyntaxKind::ClassDeclaration).count(), 0);
    }

    #[test]
    fn test_tokens_render_the_tree() {
        let tree = class_tree();
        let text: String = tree
            .root()
            .descendant_tokens()
            .map(|t| t.token_text().to_owned())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(text, "class C { int a ; int b ; }");
        assert_eq!(tree.text(), "class C { int a; int b; }");
    }

    #[test]
    fn test_ancestors_terminate_at_root() {
        let tree = class_tree();
        let b = tree
            .root()
            .descendant_tokens()
            .find(|t| t.token_text() == "b")
            .unwrap();
        let kinds: Vec<SyntaxKind> = b.ancestors().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::VariableDeclarator,
                SyntaxKind::VariableDeclaration,
                SyntaxKind::FieldDeclaration,
                SyntaxKind::DeclarationList,
                SyntaxKind::ClassDeclaration,
                SyntaxKind::CompilationUnit,
            ]
        );
        assert_eq!(b.ancestors_and_self().next().unwrap(), b);
    }
}
