//! Synthesizes a `ToString` override listing a class's fields.

use super::rewriter::{Edit, TreeRewriter};
use super::FixError;
use crate::rules::ids::RULE_ID_MISSING_TO_STRING;
use crate::rules::resolve::{class_body, class_members, field_names, resolve_receiver_class, TO_STRING};
use crate::rules::Defect;
use crate::syntax::make::{self, INDENT_UNIT};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

/// Separator placed between two fields, as the two characters `\` and `n`.
const FIELD_SEPARATOR: &str = "\\n";

fn malformed(reason: impl Into<String>) -> FixError {
    FixError::malformed(RULE_ID_MISSING_TO_STRING, reason)
}

/// Interpolation parts rendering as `a: {a}\nb: {b}`.
#[must_use]
pub fn template_parts(fields: &[String]) -> Vec<(String, &str)> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let separator = if i == 0 { "" } else { FIELD_SEPARATOR };
            (format!("{separator}{field}: "), field.as_str())
        })
        .collect()
}

/// Where the new member goes and how it is laid out.
struct Layout {
    /// Leading trivia of the new method.
    trivia: String,
    /// Indentation of a multi-line body, `None` for a one-line method.
    indent: Option<String>,
}

fn indentation(trivia: &str) -> Option<&str> {
    trivia.rfind('\n').map(|i| &trivia[i + 1..])
}

/// Follows the class's last member; an empty multi-line body gets one
/// indentation step past its closing brace.
fn layout(members: &[SyntaxNode], close: &SyntaxNode) -> Layout {
    if let Some(last) = members.last() {
        if let Some(indent) = indentation(last.green().leading_trivia()) {
            return Layout {
                trivia: format!("\n\n{indent}"),
                indent: Some(indent.to_owned()),
            };
        }
    } else if let Some(brace_indent) = indentation(close.green().leading_trivia()) {
        let indent = format!("{brace_indent}{INDENT_UNIT}");
        return Layout {
            trivia: format!("\n{indent}"),
            indent: Some(indent),
        };
    }
    Layout {
        trivia: " ".to_owned(),
        indent: None,
    }
}

/// Applies the `ToString` synthesis fix for `defect` to `tree`.
pub(super) fn apply(tree: &SyntaxTree, defect: &Defect) -> Result<SyntaxTree, FixError> {
    let access = tree
        .covering(SyntaxKind::MemberAccess, defect.span)
        .map_err(|e| malformed(e.to_string()))?;
    let target = resolve_receiver_class(&access)
        .ok_or_else(|| malformed("receiver class cannot be resolved"))?;
    let class = target.class;

    let body = class_body(&class).ok_or_else(|| malformed("class has no body"))?;
    let close = body
        .children()
        .filter(|c| c.kind() == SyntaxKind::Punctuation && c.token_text() == "}")
        .last()
        .ok_or_else(|| malformed("class body is not closed"))?;
    let members: Vec<SyntaxNode> = class_members(&class).collect();
    let layout = layout(&members, &close);

    let fields = field_names(&class);
    let parts = template_parts(&fields);
    let template = make::interpolated_string(parts.iter().map(|(prefix, name)| (prefix.as_str(), *name)));
    let method = make::method_declaration(
        &["public", "override"],
        "string",
        TO_STRING,
        make::block(&[make::return_statement(&template)], layout.indent.as_deref()),
    )
    .with_leading_trivia(&layout.trivia);

    let new_body = body.green().insert_child(close.index(), method);
    let new_class = class.green().replace_child(body.index(), new_body);
    tracing::debug!(
        receiver = %target.receiver,
        fields = fields.len(),
        "adding ToString override"
    );

    let mut rewriter = TreeRewriter::new(tree);
    rewriter.add_edit(Edit::with_description(
        &class,
        new_class,
        format!("synthesize {TO_STRING} for `{}`", target.receiver),
    ));
    Ok(rewriter.apply()?)
}
