//! Span-addressed tree rewriter.
//!
//! Edits name their target by kind and span instead of holding a node, so a
//! list of edits computed against one snapshot can be applied in a single
//! pass. Each replacement yields a new tree; the input tree is never changed.
//!
//! # Usage
//!
//! ```
//! use sharplint::cst::parse_source;
//! use sharplint::fix::{Edit, TreeRewriter};
//! use sharplint::syntax::{make, SyntaxKind};
//!
//! let tree = parse_source("class A { bool ready; }").unwrap();
//! let ident = tree.root().descendants(SyntaxKind::Identifier).nth(1).unwrap();
//! let mut rewriter = TreeRewriter::new(&tree);
//! rewriter.add_edit(Edit::replace(&ident, make::identifier("done")));
//! let fixed = rewriter.apply().unwrap();
//! assert_eq!(fixed.text(), "class A { bool done; }");
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::syntax::{GreenNode, QueryError, SyntaxKind, SyntaxNode, SyntaxTree, TextRange, TextSize};

/// A single node replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Kind of the node to replace.
    pub kind: SyntaxKind,
    /// Span of the node to replace, leading trivia excluded.
    pub span: TextRange,
    /// Replacement node. Its own leading trivia is discarded in favour of
    /// the trivia of the node it replaces.
    pub replacement: Arc<GreenNode>,
    /// Optional description for logging
    pub description: Option<String>,
}

impl Edit {
    /// Replace `target` with `replacement`.
    #[must_use]
    pub fn replace(target: &SyntaxNode, replacement: Arc<GreenNode>) -> Self {
        Self {
            kind: target.kind(),
            span: target.span(),
            replacement,
            description: None,
        }
    }

    /// Create an edit with description
    #[must_use]
    pub fn with_description(
        target: &SyntaxNode,
        replacement: Arc<GreenNode>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::replace(target, replacement)
        }
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.span.start() < other.span.end() && other.span.start() < self.span.end()
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges
    #[error("overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds
    #[error("edit {edit_index} out of bounds: end {end:?} > tree length {tree_len:?}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// End offset of the edit
        end: TextSize,
        /// Length of the tree text
        tree_len: TextSize,
    },
    /// No node of the edit's kind has the edit's span
    #[error("edit {edit_index} has no target: {source}")]
    TargetNotFound {
        /// Index of the bad edit
        edit_index: usize,
        /// Failed lookup
        source: QueryError,
    },
}

/// Applies node replacements to a tree, last edit first.
#[derive(Debug, Clone)]
pub struct TreeRewriter {
    tree: SyntaxTree,
    edits: Vec<Edit>,
}

impl TreeRewriter {
    /// Create a new rewriter for the given tree
    #[must_use]
    pub fn new(tree: &SyntaxTree) -> Self {
        Self {
            tree: tree.clone(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Get the number of pending edits
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Check if there are any pending edits
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds or miss their target
    pub fn validate(&self) -> Result<(), RewriteError> {
        let tree_len = self.tree.len();
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.span.end() > tree_len {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    end: edit.span.end(),
                    tree_len,
                });
            }
        }

        for i in 0..self.edits.len() {
            for j in (i + 1)..self.edits.len() {
                if self.edits[i].overlaps(&self.edits[j]) {
                    return Err(RewriteError::OverlappingEdits {
                        edit_a: i,
                        edit_b: j,
                    });
                }
            }
        }

        for (i, edit) in self.edits.iter().enumerate() {
            self.tree
                .covering(edit.kind, edit.span)
                .map_err(|source| RewriteError::TargetNotFound {
                    edit_index: i,
                    source,
                })?;
        }

        Ok(())
    }

    /// Apply all edits and return the new tree
    ///
    /// Edits are applied from the highest start offset to the lowest, so the
    /// spans of the edits still pending keep pointing at the same nodes.
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds or miss their target
    pub fn apply(self) -> Result<SyntaxTree, RewriteError> {
        self.validate()?;

        let mut order: Vec<usize> = (0..self.edits.len()).collect();
        order.sort_by(|&a, &b| self.edits[b].span.start().cmp(&self.edits[a].span.start()));

        let mut tree = self.tree;
        for i in order {
            let edit = &self.edits[i];
            let target = tree
                .covering(edit.kind, edit.span)
                .map_err(|source| RewriteError::TargetNotFound {
                    edit_index: i,
                    source,
                })?;
            if let Some(description) = &edit.description {
                tracing::debug!(span = ?edit.span, "{description}");
            }
            let replacement = edit
                .replacement
                .with_leading_trivia(target.green().leading_trivia());
            tree = target.replace_with(replacement);
        }

        Ok(tree)
    }
}

/// Builder for constructing multiple edits
#[derive(Debug, Default)]
pub struct EditBuilder {
    edits: Vec<Edit>,
}

impl EditBuilder {
    /// Create a new edit builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement edit
    #[must_use]
    pub fn replace(mut self, target: &SyntaxNode, replacement: Arc<GreenNode>) -> Self {
        self.edits.push(Edit::replace(target, replacement));
        self
    }

    /// Add a replacement edit for every node yielded by `targets`
    #[must_use]
    pub fn replace_each(
        mut self,
        targets: impl IntoIterator<Item = SyntaxNode>,
        replacement: &Arc<GreenNode>,
    ) -> Self {
        self.edits.extend(
            targets
                .into_iter()
                .map(|target| Edit::replace(&target, Arc::clone(replacement))),
        );
        self
    }

    /// Build the list of edits
    #[must_use]
    pub fn build(self) -> Vec<Edit> {
        self.edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;
    use crate::syntax::make;

    fn identifiers(tree: &SyntaxTree, name: &str) -> Vec<SyntaxNode> {
        tree.root()
            .descendants(SyntaxKind::Identifier)
            .filter(|i| i.token_text() == name)
            .collect()
    }

    #[test]
    fn test_simple_replacement() {
        let tree = parse_source("class A { int a; }").unwrap();
        let mut rewriter = TreeRewriter::new(&tree);
        rewriter.add_edit(Edit::replace(&identifiers(&tree, "a")[0], make::identifier("b")));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result.text(), "class A { int b; }");
        assert_eq!(tree.text(), "class A { int a; }");
    }

    #[test]
    fn test_multiple_edits_apply_back_to_front() {
        let source = "class A { void M() { x = x + x; } }";
        let tree = parse_source(source).unwrap();
        let edits = EditBuilder::new()
            .replace_each(identifiers(&tree, "x"), &make::negation("longer"))
            .build();
        assert_eq!(edits.len(), 3);

        let mut rewriter = TreeRewriter::new(&tree);
        rewriter.add_edits(edits);
        let result = rewriter.apply().expect("should apply");
        assert_eq!(
            result.text(),
            "class A { void M() { !longer = !longer + !longer; } }"
        );
    }

    #[test]
    fn test_overlapping_edits_error() {
        let tree = parse_source("class A { int a; }").unwrap();
        let field = tree.root().descendants(SyntaxKind::FieldDeclaration).next().unwrap();
        let mut rewriter = TreeRewriter::new(&tree);
        rewriter.add_edit(Edit::replace(&field, make::identifier("x")));
        rewriter.add_edit(Edit::replace(&identifiers(&tree, "a")[0], make::identifier("b")));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OverlappingEdits { .. })));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let tree = parse_source("class A { }").unwrap();
        let mut rewriter = TreeRewriter::new(&tree);
        rewriter.add_edit(Edit {
            kind: SyntaxKind::Identifier,
            span: TextRange::new(0.into(), 100.into()),
            replacement: make::identifier("x"),
            description: None,
        });

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn test_target_must_exist_in_this_tree() {
        let old = parse_source("class A { int a; }").unwrap();
        let new = parse_source("class A { int ab; }").unwrap();
        let mut rewriter = TreeRewriter::new(&new);
        rewriter.add_edit(Edit::replace(&identifiers(&old, "a")[0], make::identifier("b")));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::TargetNotFound { edit_index: 0, .. })));
    }

    #[test]
    fn test_preserves_trivia() {
        let source = "class A\n{\n    // keep me\n    int a;\n}\n";
        let tree = parse_source(source).unwrap();
        let mut rewriter = TreeRewriter::new(&tree);
        rewriter.add_edit(Edit::with_description(
            &identifiers(&tree, "a")[0],
            make::identifier("b"),
            "rename field",
        ));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result.text(), "class A\n{\n    // keep me\n    int b;\n}\n");
    }

    #[test]
    fn test_empty_edits() {
        let tree = parse_source("class A { }").unwrap();
        let rewriter = TreeRewriter::new(&tree);
        assert!(!rewriter.has_edits());
        let result = rewriter.apply().expect("should apply");
        assert_eq!(result.text(), tree.text());
    }
}
