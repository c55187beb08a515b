//! Tree-sitter front end for C# sources.
//!
//! This module turns source text into the immutable [`SyntaxTree`] the rules
//! and the fix engine work on:
//! - every byte of the input lands in a token or in its leading trivia, so a
//!   parsed tree renders back to its exact input
//! - grammar nodes are mapped onto the closed [`SyntaxKind`] set; nodes the
//!   rules never inspect become [`SyntaxKind::Unknown`]
//! - small grammar differences (`equals_value_clause`, keyword leaves) are
//!   normalized so the tree shape does not depend on the grammar version
//!
//! [`SyntaxTree`]: crate::syntax::SyntaxTree
//! [`SyntaxKind`]: crate::syntax::SyntaxKind
//! [`SyntaxKind::Unknown`]: crate::syntax::SyntaxKind::Unknown

mod kinds;
mod parser;

pub use parser::{parse_source, CstError, CstParser};
