//! Factory for synthesized nodes.
//!
//! Every builder returns a node whose first token has no leading trivia; the
//! caller decides where the node goes and attaches trivia with
//! [`GreenNode::with_leading_trivia`].

use std::sync::Arc;

use super::{GreenNode, SyntaxKind};

/// One indentation step inside a synthesized block.
pub const INDENT_UNIT: &str = "    ";

/// A bare token.
#[must_use]
pub fn token(kind: SyntaxKind, text: &str) -> Arc<GreenNode> {
    GreenNode::token(kind, "", text)
}

fn spaced(kind: SyntaxKind, text: &str) -> Arc<GreenNode> {
    GreenNode::token(kind, " ", text)
}

/// An identifier token.
#[must_use]
pub fn identifier(name: &str) -> Arc<GreenNode> {
    token(SyntaxKind::Identifier, name)
}

/// `!name`
#[must_use]
pub fn negation(name: &str) -> Arc<GreenNode> {
    GreenNode::node(
        SyntaxKind::PrefixUnary,
        [token(SyntaxKind::Punctuation, "!"), identifier(name)],
    )
}

/// `name = initializer`, or just `name`.
#[must_use]
pub fn variable_declarator(name: &str, initializer: Option<&Arc<GreenNode>>) -> Arc<GreenNode> {
    let mut children = vec![identifier(name)];
    if let Some(init) = initializer {
        children.push(spaced(SyntaxKind::Punctuation, "="));
        children.push(init.with_leading_trivia(" "));
    }
    GreenNode::node(SyntaxKind::VariableDeclarator, children)
}

/// `keyword first, rest...` where `rest` already carries its separators.
#[must_use]
pub fn variable_declaration(
    type_keyword: &str,
    first: &Arc<GreenNode>,
    rest: impl IntoIterator<Item = Arc<GreenNode>>,
) -> Arc<GreenNode> {
    let children = [
        token(SyntaxKind::PredefinedType, type_keyword),
        first.with_leading_trivia(" "),
    ]
    .into_iter()
    .chain(rest);
    GreenNode::node(SyntaxKind::VariableDeclaration, children)
}

/// `$"<prefix>{name}..."` built from `(literal prefix, interpolated name)`
/// pairs.
#[must_use]
pub fn interpolated_string<'a>(parts: impl IntoIterator<Item = (&'a str, &'a str)>) -> Arc<GreenNode> {
    let mut children = vec![token(SyntaxKind::Punctuation, "$\"")];
    for (prefix, name) in parts {
        if !prefix.is_empty() {
            children.push(token(SyntaxKind::LiteralToken, prefix));
        }
        children.push(GreenNode::node(
            SyntaxKind::Unknown,
            [
                token(SyntaxKind::Punctuation, "{"),
                identifier(name),
                token(SyntaxKind::Punctuation, "}"),
            ],
        ));
    }
    children.push(token(SyntaxKind::Punctuation, "\""));
    GreenNode::node(SyntaxKind::InterpolatedString, children)
}

/// `return expr;`
#[must_use]
pub fn return_statement(expr: &Arc<GreenNode>) -> Arc<GreenNode> {
    GreenNode::node(
        SyntaxKind::ReturnStatement,
        [
            token(SyntaxKind::Keyword, "return"),
            expr.with_leading_trivia(" "),
            token(SyntaxKind::Punctuation, ";"),
        ],
    )
}

/// `{ statements }`.
///
/// With `indent`, the block spans several lines: braces at `indent`,
/// statements one [`INDENT_UNIT`] deeper. Without it, everything stays on
/// one line.
#[must_use]
pub fn block(statements: &[Arc<GreenNode>], indent: Option<&str>) -> Arc<GreenNode> {
    let (brace, inner) = match indent {
        Some(indent) => (format!("\n{indent}"), format!("\n{indent}{INDENT_UNIT}")),
        None => (" ".to_owned(), " ".to_owned()),
    };
    let mut children = vec![GreenNode::token(SyntaxKind::Punctuation, &brace, "{")];
    children.extend(statements.iter().map(|s| s.with_leading_trivia(&inner)));
    children.push(GreenNode::token(SyntaxKind::Punctuation, &brace, "}"));
    GreenNode::node(SyntaxKind::Block, children)
}

/// `modifiers return_type name() body`
#[must_use]
pub fn method_declaration(
    modifiers: &[&str],
    return_type: &str,
    name: &str,
    body: Arc<GreenNode>,
) -> Arc<GreenNode> {
    let mut children: Vec<Arc<GreenNode>> = modifiers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let keyword = GreenNode::token(SyntaxKind::Keyword, if i == 0 { "" } else { " " }, m);
            GreenNode::node(SyntaxKind::Modifier, [keyword])
        })
        .collect();
    let type_trivia = if children.is_empty() { "" } else { " " };
    children.push(GreenNode::token(SyntaxKind::PredefinedType, type_trivia, return_type));
    children.push(spaced(SyntaxKind::Identifier, name));
    children.push(GreenNode::node(
        SyntaxKind::ParameterList,
        [
            token(SyntaxKind::Punctuation, "("),
            token(SyntaxKind::Punctuation, ")"),
        ],
    ));
    children.push(body);
    GreenNode::node(SyntaxKind::MethodDeclaration, children)
}
