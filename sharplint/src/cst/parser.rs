//! Tree-sitter based parser producing full-fidelity syntax trees.

use std::sync::Arc;

use thiserror::Error;
use tree_sitter::{Node, Parser};

use super::kinds::{is_transparent, node_kind, spelling_kind, token_kind};
use crate::syntax::{GreenNode, SyntaxKind, SyntaxTree};

/// Error during CST parsing
#[derive(Debug, Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("failed to create C# parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source
    #[error("failed to parse source as C#")]
    ParseFailed,
}

/// Tree-sitter based C# parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new parser for C#
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse source code into a syntax tree
    ///
    /// Syntax errors do not fail the parse; they show up as
    /// [`SyntaxKind::Error`] nodes.
    ///
    /// # Errors
    /// Returns error if tree-sitter gives up on the input
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        let mut builder = TreeBuilder { source, cursor: 0 };
        let mut children = builder.lower(tree.root_node());
        let trailing = source.get(builder.cursor..).unwrap_or_default();
        children.push(GreenNode::token(SyntaxKind::EndOfFile, trailing, ""));

        let root = match children.first() {
            Some(first) if children.len() == 2 && first.kind() == SyntaxKind::CompilationUnit => {
                // keep the end-of-file token inside the compilation unit
                let unit = Arc::clone(first);
                unit.insert_child(unit.children().len(), Arc::clone(&children[1]))
            }
            _ => GreenNode::node(SyntaxKind::CompilationUnit, children),
        };
        let tree = SyntaxTree::new(root);
        if tree.root().descendants(SyntaxKind::Error).next().is_some() {
            tracing::debug!("source contains syntax errors");
        }
        Ok(tree)
    }
}

/// Parse `source` with a fresh parser.
///
/// # Errors
/// Returns error if the parser cannot be created or gives up
pub fn parse_source(source: &str) -> Result<SyntaxTree, CstError> {
    CstParser::new()?.parse(source)
}

/// Lowers grammar nodes into green nodes, assigning every byte between two
/// leaves to the leading trivia of the second one.
struct TreeBuilder<'s> {
    source: &'s str,
    cursor: usize,
}

impl TreeBuilder<'_> {
    /// Lowers `node`; transparent wrappers yield their children instead.
    fn lower(&mut self, node: Node<'_>) -> Vec<Arc<GreenNode>> {
        if node.child_count() == 0 {
            return vec![self.leaf(node)];
        }

        let kind = node_kind(node.kind());
        let mut walker = node.walk();
        let mut children = Vec::with_capacity(node.child_count());
        for child in node.children(&mut walker) {
            let lowered = self.lower(child);
            if kind == SyntaxKind::BaseList && child.is_named() && child.kind() != "comment" {
                children.push(GreenNode::node(SyntaxKind::BaseTypeReference, lowered));
            } else {
                children.extend(lowered);
            }
        }

        if is_transparent(node.kind()) {
            children
        } else {
            vec![GreenNode::node(kind, children)]
        }
    }

    fn leaf(&mut self, node: Node<'_>) -> Arc<GreenNode> {
        let start = node.start_byte().max(self.cursor);
        let end = node.end_byte().max(start);
        let leading = self.source.get(self.cursor..start).unwrap_or_default();
        let text = self.source.get(start..end).unwrap_or_default();
        self.cursor = end;

        let wrapper = node_kind(node.kind());
        if node.is_named() && wrapper != SyntaxKind::Unknown {
            // `true`, `public`, ... lexed as a single named leaf
            let token = GreenNode::token(spelling_kind(text), leading, text);
            return GreenNode::node(wrapper, [token]);
        }
        GreenNode::token(token_kind(node.kind(), node.is_named(), text), leading, text)
    }
}
