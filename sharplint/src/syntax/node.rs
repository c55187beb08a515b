//! Positioned views over green nodes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use text_size::{TextRange, TextSize};

use super::{GreenNode, QueryError, SyntaxKind};

/// A node at a concrete position of a tree.
///
/// Cloning is cheap. The parent link is a lookup relation created while
/// navigating downwards; it never needs re-validation because trees are
/// immutable.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

struct NodeData {
    green: Arc<GreenNode>,
    parent: Option<SyntaxNode>,
    index: usize,
    offset: TextSize,
}

impl SyntaxNode {
    /// Creates the root view of a tree.
    #[must_use]
    pub fn new_root(green: Arc<GreenNode>) -> Self {
        Self(Arc::new(NodeData {
            green,
            parent: None,
            index: 0,
            offset: TextSize::from(0),
        }))
    }

    fn new_child(parent: &SyntaxNode, green: Arc<GreenNode>, index: usize, offset: TextSize) -> Self {
        Self(Arc::new(NodeData {
            green,
            parent: Some(parent.clone()),
            index,
            offset,
        }))
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    /// Underlying green node.
    #[must_use]
    pub fn green(&self) -> &Arc<GreenNode> {
        &self.0.green
    }

    /// Whether this is a leaf.
    #[must_use]
    pub fn is_token(&self) -> bool {
        self.0.green.is_token()
    }

    /// Token text without trivia. Empty for inner nodes.
    #[must_use]
    pub fn token_text(&self) -> &str {
        self.0.green.text()
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent.clone()
    }

    /// Position of this node in its parent's child list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Range including leading trivia.
    #[must_use]
    pub fn full_span(&self) -> TextRange {
        TextRange::at(self.0.offset, self.0.green.full_len())
    }

    /// Range of the node text, without the leading trivia of its first token.
    #[must_use]
    pub fn span(&self) -> TextRange {
        let full = self.full_span();
        let trivia = TextSize::of(self.0.green.leading_trivia());
        TextRange::new(full.start() + trivia, full.end())
    }

    /// Source text of this node, leading trivia excluded.
    #[must_use]
    pub fn text(&self) -> String {
        let full = self.0.green.to_string();
        full[self.0.green.leading_trivia().len()..].to_owned()
    }

    /// Children in source order.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        let mut offset = self.0.offset;
        self.0.green.children().iter().enumerate().map(move |(i, green)| {
            let child = SyntaxNode::new_child(self, Arc::clone(green), i, offset);
            offset += green.full_len();
            child
        })
    }

    /// Child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<SyntaxNode> {
        self.children().nth(index)
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|c| c.kind() == kind)
    }

    /// Direct children of the given kind.
    pub fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.children().filter(move |c| c.kind() == kind)
    }

    /// First direct child that is not a token.
    #[must_use]
    pub fn first_inner_child(&self) -> Option<SyntaxNode> {
        self.children().find(|c| !c.is_token())
    }

    /// Root of the tree this node belongs to.
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        self.ancestors_and_self()
            .last()
            .unwrap_or_else(|| self.clone())
    }

    /// Builds a new tree in which this node is replaced by `replacement`.
    ///
    /// Only the path from this node to the root is rebuilt; every other
    /// subtree is shared with the current tree, which stays valid.
    #[must_use]
    pub fn replace_with(&self, replacement: Arc<GreenNode>) -> SyntaxTree {
        let mut green = replacement;
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            green = parent.green().replace_child(node.index(), green);
            node = parent;
        }
        SyntaxTree::new(green)
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0.green, &other.0.green) && self.0.offset == other.0.offset
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0.green).hash(state);
        self.0.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{:?}@{:?}..{:?}", self.kind(), span.start(), span.end())?;
        if self.is_token() {
            write!(f, " {:?}", self.token_text())?;
        }
        Ok(())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// An immutable syntax tree for one source file.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Wraps a green root.
    #[must_use]
    pub fn new(green: Arc<GreenNode>) -> Self {
        Self {
            root: SyntaxNode::new_root(green),
        }
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Total length of the source text.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.root.green().full_len()
    }

    /// Whether the tree holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == TextSize::from(0)
    }

    /// Renders the complete source text, trivia included.
    #[must_use]
    pub fn text(&self) -> String {
        self.root.green().to_string()
    }

    /// Smallest node whose full span contains `offset`.
    ///
    /// Offsets inside trivia resolve to the token the trivia belongs to.
    pub fn find_at(&self, offset: TextSize) -> Result<SyntaxNode, QueryError> {
        if !self.root.full_span().contains(offset) {
            return Err(QueryError::NotFound { offset });
        }
        let mut node = self.root.clone();
        loop {
            let next = node.children().find(|c| c.full_span().contains(offset));
            match next {
                Some(child) => node = child,
                None => return Ok(node),
            }
        }
    }

    /// Re-resolves a node of `kind` whose span is exactly `span`.
    pub fn covering(&self, kind: SyntaxKind, span: TextRange) -> Result<SyntaxNode, QueryError> {
        self.find_at(span.start())?
            .ancestors_and_self()
            .find(|n| n.kind() == kind && n.span() == span)
            .ok_or(QueryError::NoMatch { kind, span })
    }

    /// Whether `node` was obtained from this tree snapshot.
    #[must_use]
    pub fn owns(&self, node: &SyntaxNode) -> bool {
        node.root() == self.root
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
