//! Immutable, position-independent node storage.
//!
//! Green nodes know their kind, their children and their text length, but not
//! where they sit in a file. Positioned views are built on top of them by
//! [`SyntaxNode`](super::SyntaxNode). Because green nodes are shared through
//! `Arc`, an edit only rebuilds the path from the edited node to the root.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;
use text_size::TextSize;

use super::SyntaxKind;

/// Shared node payload. Leaves (tokens) carry text and leading trivia, inner
/// nodes carry children.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode {
    kind: SyntaxKind,
    text: CompactString,
    leading: CompactString,
    children: SmallVec<[Arc<GreenNode>; 4]>,
    full_len: TextSize,
}

impl GreenNode {
    /// Creates a token with the given leading trivia.
    #[must_use]
    pub fn token(kind: SyntaxKind, leading: &str, text: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            text: CompactString::new(text),
            leading: CompactString::new(leading),
            children: SmallVec::new(),
            full_len: TextSize::of(leading) + TextSize::of(text),
        })
    }

    /// Creates an inner node from its children, in source order.
    #[must_use]
    pub fn node(kind: SyntaxKind, children: impl IntoIterator<Item = Arc<GreenNode>>) -> Arc<Self> {
        let children: SmallVec<[Arc<GreenNode>; 4]> = children.into_iter().collect();
        let full_len = children
            .iter()
            .fold(TextSize::from(0), |len, c| len + c.full_len);
        Arc::new(Self {
            kind,
            text: CompactString::default(),
            leading: CompactString::default(),
            children,
            full_len,
        })
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Whether this is a leaf.
    #[must_use]
    pub fn is_token(&self) -> bool {
        self.kind.is_token()
    }

    /// Token text without trivia. Empty for inner nodes.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Children in source order. Empty for tokens.
    #[must_use]
    pub fn children(&self) -> &[Arc<GreenNode>] {
        &self.children
    }

    /// Length including all trivia.
    #[must_use]
    pub fn full_len(&self) -> TextSize {
        self.full_len
    }

    /// First leaf in source order.
    #[must_use]
    pub fn first_token(&self) -> Option<&GreenNode> {
        if self.is_token() {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.first_token())
    }

    /// Trivia preceding the first token of this node.
    #[must_use]
    pub fn leading_trivia(&self) -> &str {
        self.first_token().map_or("", |t| t.leading.as_str())
    }

    /// Returns a copy whose first token carries `trivia` as leading trivia.
    #[must_use]
    pub fn with_leading_trivia(self: &Arc<Self>, trivia: &str) -> Arc<Self> {
        if self.is_token() {
            return Self::token(self.kind, trivia, &self.text);
        }
        match self.children.iter().position(|c| c.first_token().is_some()) {
            Some(i) => self.replace_child(i, self.children[i].with_leading_trivia(trivia)),
            None => Arc::clone(self),
        }
    }

    /// Returns a copy with the child at `index` replaced. Siblings are shared.
    #[must_use]
    pub fn replace_child(&self, index: usize, child: Arc<GreenNode>) -> Arc<Self> {
        let children = self
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| if i == index { Arc::clone(&child) } else { Arc::clone(c) });
        Self::node(self.kind, children)
    }

    /// Returns a copy with `child` inserted before position `index`.
    #[must_use]
    pub fn insert_child(&self, index: usize, child: Arc<GreenNode>) -> Arc<Self> {
        let mut children: Vec<Arc<GreenNode>> = self.children.iter().map(Arc::clone).collect();
        children.insert(index.min(children.len()), child);
        Self::node(self.kind, children)
    }

    /// Appends the source text of this node to `out`.
    pub fn write_text(&self, out: &mut String) {
        if self.is_token() {
            out.push_str(&self.leading);
            out.push_str(&self.text);
            return;
        }
        for child in &self.children {
            child.write_text(out);
        }
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(usize::from(self.full_len));
        self.write_text(&mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_token() {
            write!(f, "{:?} {:?}", self.kind, self.text.as_str())
        } else {
            f.debug_tuple(&format!("{:?}", self.kind))
                .field(&self.children)
                .finish()
        }
    }
}
