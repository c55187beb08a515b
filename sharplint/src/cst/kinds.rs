//! Grammar node names to [`SyntaxKind`].

use crate::syntax::SyntaxKind;

/// Kind of an inner grammar node.
pub(super) fn node_kind(grammar_kind: &str) -> SyntaxKind {
    match grammar_kind {
        "compilation_unit" => SyntaxKind::CompilationUnit,
        "namespace_declaration" | "file_scoped_namespace_declaration" => {
            SyntaxKind::NamespaceDeclaration
        }
        "class_declaration" => SyntaxKind::ClassDeclaration,
        "declaration_list" => SyntaxKind::DeclarationList,
        "field_declaration" => SyntaxKind::FieldDeclaration,
        "method_declaration" => SyntaxKind::MethodDeclaration,
        "modifier" => SyntaxKind::Modifier,
        "parameter_list" => SyntaxKind::ParameterList,
        "parameter" => SyntaxKind::Parameter,
        "base_list" => SyntaxKind::BaseList,
        "block" => SyntaxKind::Block,
        "local_declaration_statement" => SyntaxKind::LocalDeclarationStatement,
        "variable_declaration" => SyntaxKind::VariableDeclaration,
        "variable_declarator" => SyntaxKind::VariableDeclarator,
        "expression_statement" => SyntaxKind::ExpressionStatement,
        "if_statement" => SyntaxKind::IfStatement,
        "return_statement" => SyntaxKind::ReturnStatement,
        "member_access_expression" => SyntaxKind::MemberAccess,
        "invocation_expression" => SyntaxKind::Invocation,
        "object_creation_expression" => SyntaxKind::ObjectCreation,
        "argument_list" => SyntaxKind::ArgumentList,
        "argument" => SyntaxKind::Argument,
        "qualified_name" => SyntaxKind::QualifiedName,
        "generic_name" => SyntaxKind::GenericName,
        "nullable_type" => SyntaxKind::NullableType,
        "prefix_unary_expression" => SyntaxKind::PrefixUnary,
        "boolean_literal"
        | "string_literal"
        | "verbatim_string_literal"
        | "raw_string_literal"
        | "character_literal" => SyntaxKind::Literal,
        "interpolated_string_expression" => SyntaxKind::InterpolatedString,
        "ERROR" => SyntaxKind::Error,
        _ => SyntaxKind::Unknown,
    }
}

/// Kind of a grammar leaf.
///
/// Named leaves the rules care about keep their own kind. Other named leaves
/// are literal pieces (`42`, `null`, string content). Anonymous leaves are
/// keywords or punctuation depending on their spelling.
pub(super) fn token_kind(grammar_kind: &str, is_named: bool, text: &str) -> SyntaxKind {
    match grammar_kind {
        "identifier" => SyntaxKind::Identifier,
        "predefined_type" => SyntaxKind::PredefinedType,
        "implicit_type" => SyntaxKind::ImplicitType,
        "comment" => SyntaxKind::Comment,
        _ if is_named => SyntaxKind::LiteralToken,
        _ => spelling_kind(text),
    }
}

/// Keyword or punctuation, judged by spelling.
pub(super) fn spelling_kind(text: &str) -> SyntaxKind {
    match text.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' => SyntaxKind::Keyword,
        _ => SyntaxKind::Punctuation,
    }
}

/// Grammar wrappers whose children are spliced into the parent.
pub(super) fn is_transparent(grammar_kind: &str) -> bool {
    grammar_kind == "equals_value_clause"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_nodes() {
        assert_eq!(node_kind("class_declaration"), SyntaxKind::ClassDeclaration);
        assert_eq!(node_kind("member_access_expression"), SyntaxKind::MemberAccess);
        assert_eq!(node_kind("while_statement"), SyntaxKind::Unknown);
    }

    #[test]
    fn test_leaf_classification() {
        assert_eq!(token_kind("identifier", true, "x"), SyntaxKind::Identifier);
        assert_eq!(token_kind("integer_literal", true, "4"), SyntaxKind::LiteralToken);
        assert_eq!(token_kind("if", false, "if"), SyntaxKind::Keyword);
        assert_eq!(token_kind("(", false, "("), SyntaxKind::Punctuation);
    }
}
