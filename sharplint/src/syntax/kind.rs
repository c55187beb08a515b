//! Node and token kinds of the C# syntax tree.

use serde::Serialize;

/// Kind tag carried by every node of a syntax tree.
///
/// The enumeration is closed: grammar constructs the rules never look at are
/// tagged [`SyntaxKind::Unknown`] and only keep their text and structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    // Declarations
    /// Root of a source file.
    CompilationUnit,
    /// `namespace N { ... }` or a file-scoped namespace.
    NamespaceDeclaration,
    /// `class C : Base { ... }`
    ClassDeclaration,
    /// Braced member list of a type or namespace.
    DeclarationList,
    /// Field member (`int a;`), wraps a [`SyntaxKind::VariableDeclaration`].
    FieldDeclaration,
    /// Method member.
    MethodDeclaration,
    /// `public`, `override`, ...
    Modifier,
    /// `(int a, bool b)`
    ParameterList,
    /// A single parameter.
    Parameter,
    /// `: Base, IFoo`
    BaseList,
    /// One entry of a base list.
    BaseTypeReference,

    // Statements
    /// `{ ... }`
    Block,
    /// `bool x = true;`
    LocalDeclarationStatement,
    /// Declared type plus one or more declarators.
    VariableDeclaration,
    /// Identifier plus optional `= initializer`.
    VariableDeclarator,
    /// Expression followed by `;`.
    ExpressionStatement,
    /// `if (...) ...`
    IfStatement,
    /// `return ...;`
    ReturnStatement,

    // Expressions and names
    /// `receiver.Member`
    MemberAccess,
    /// `callee(args)`
    Invocation,
    /// `new T(args)`
    ObjectCreation,
    /// `(args)` of a call or object creation.
    ArgumentList,
    /// A single argument.
    Argument,
    /// `A.B`
    QualifiedName,
    /// `List<T>`
    GenericName,
    /// `T?`
    NullableType,
    /// `!x`, `-x`, ...
    PrefixUnary,
    /// Literal expression with inner structure (`true`, `"text"`).
    Literal,
    /// `$"..."`
    InterpolatedString,
    /// Region the front end could not parse.
    Error,
    /// Any other construct.
    Unknown,

    // Tokens
    /// Identifier token.
    Identifier,
    /// Built-in type keyword (`bool`, `string`, `object`, ...).
    PredefinedType,
    /// `var`
    ImplicitType,
    /// Any other keyword.
    Keyword,
    /// Operators, separators and brackets.
    Punctuation,
    /// Literal token (`42`, `null`, string content).
    LiteralToken,
    /// `// ...` or `/* ... */`
    Comment,
    /// Zero-width token holding the trailing trivia of a file.
    EndOfFile,
}

impl SyntaxKind {
    /// Whether nodes of this kind are leaves carrying source text.
    #[must_use]
    pub const fn is_token(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::PredefinedType
                | Self::ImplicitType
                | Self::Keyword
                | Self::Punctuation
                | Self::LiteralToken
                | Self::Comment
                | Self::EndOfFile
        )
    }

    /// Whether this kind can appear where a type is expected.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::PredefinedType
                | Self::ImplicitType
                | Self::QualifiedName
                | Self::GenericName
                | Self::NullableType
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_leaves() {
        assert!(SyntaxKind::Identifier.is_token());
        assert!(SyntaxKind::EndOfFile.is_token());
        assert!(!SyntaxKind::VariableDeclaration.is_token());
        assert!(!SyntaxKind::Literal.is_token());
    }

    #[test]
    fn test_type_kinds() {
        assert!(SyntaxKind::PredefinedType.is_type());
        assert!(SyntaxKind::GenericName.is_type());
        assert!(!SyntaxKind::ObjectCreation.is_type());
    }
}
