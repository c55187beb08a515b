//! Immutable, position-addressed syntax trees.
//!
//! This module is the query substrate shared by the rules and the fix engine:
//!
//! - [`GreenNode`]: shared, position-independent storage
//! - [`SyntaxNode`]: a node at a concrete offset, with a parent link
//! - [`SyntaxTree`]: one file, renderable back to its exact source text
//! - traversals: `find_at`, `descendants`, `ancestors`, `ancestors_and_self`
//! - [`make`]: factory for synthesized nodes
//!
//! Trees never change. An edit produces a new root that shares every
//! untouched subtree with the old one.

mod green;
mod kind;
pub mod make;
mod node;
mod query;

pub use green::GreenNode;
pub use kind::SyntaxKind;
pub use node::{SyntaxNode, SyntaxTree};
pub use query::{Preorder, QueryError};
pub use text_size::{TextRange, TextSize};
