//! Syntactic name and type resolution.
//!
//! There is no type checker behind these helpers. Declarations, types and
//! base classes are found by walking the tree and comparing names, so the
//! answers are approximations:
//! - scoping: the first declaration found while searching outwards wins,
//!   shadowed names in nested blocks are not told apart
//! - types: only `new T(...)` initializers reveal the type of a local
//! - inheritance: a base class is found by name among enclosing declarations
//!
//! Every lookup returns `None` instead of guessing when a step fails.

use rustc_hash::FxHashSet;

use crate::syntax::{SyntaxKind, SyntaxNode};

/// Name of the string conversion method.
pub const TO_STRING: &str = "ToString";

/// Base type name that ends an inheritance chain, compared case-insensitively.
const ROOT_TYPE: &str = "object";

/// First declarator of a variable declaration.
#[must_use]
pub fn first_declarator(declaration: &SyntaxNode) -> Option<SyntaxNode> {
    declaration.first_child_of_kind(SyntaxKind::VariableDeclarator)
}

/// Identifier token of a declarator.
#[must_use]
pub fn declarator_identifier(declarator: &SyntaxNode) -> Option<SyntaxNode> {
    declarator.identifier()
}

/// Name declared by the first declarator of a variable declaration.
#[must_use]
pub fn declared_name(declaration: &SyntaxNode) -> Option<String> {
    first_declarator(declaration)
        .and_then(|d| declarator_identifier(&d))
        .map(|ident| ident.token_text().to_owned())
}

/// Declared type of a variable declaration (its first child).
#[must_use]
pub fn declared_type(declaration: &SyntaxNode) -> Option<SyntaxNode> {
    declaration.child(0).filter(|ty| ty.kind().is_type())
}

/// Initializer expression of a declarator: the node following `=`.
#[must_use]
pub fn initializer(declarator: &SyntaxNode) -> Option<SyntaxNode> {
    let mut children = declarator.children();
    children.find(|c| c.kind() == SyntaxKind::Punctuation && c.token_text() == "=")?;
    children.next()
}

/// Whether `node` is a literal expression (`true`, `42`, `"text"`, `null`).
#[must_use]
pub fn is_literal(node: &SyntaxNode) -> bool {
    matches!(node.kind(), SyntaxKind::Literal | SyntaxKind::LiteralToken)
}

/// Simple name of a type node.
///
/// `Foo` gives `Foo`, `A.B.Foo` gives `Foo`, `Foo<T>` gives `Foo`, `object`
/// gives `object`. Arrays, tuples and other shapes give `None`.
#[must_use]
pub fn type_name(ty: &SyntaxNode) -> Option<String> {
    match ty.kind() {
        SyntaxKind::Identifier | SyntaxKind::PredefinedType => Some(ty.token_text().to_owned()),
        SyntaxKind::GenericName => ty.identifier().map(|i| i.token_text().to_owned()),
        SyntaxKind::QualifiedName => ty
            .children()
            .filter(|c| c.kind() != SyntaxKind::Punctuation && c.kind() != SyntaxKind::Comment)
            .last()
            .and_then(|last| type_name(&last)),
        _ => None,
    }
}

/// Receiver of `receiver.Member` when it is a plain identifier.
#[must_use]
pub fn simple_receiver(access: &SyntaxNode) -> Option<SyntaxNode> {
    access.child(0).filter(|r| r.kind() == SyntaxKind::Identifier)
}

/// Accessed member name of `receiver.Member`.
#[must_use]
pub fn member_name(access: &SyntaxNode) -> Option<SyntaxNode> {
    access
        .children_of_kind(SyntaxKind::Identifier)
        .last()
        .filter(|name| name.index() > 0)
}

/// Searches outwards from `from` for a variable declaration named `name`.
///
/// Each ancestor, nearest first, is searched in pre-order; the first
/// declaration whose first declarator matches wins.
#[must_use]
pub fn find_declaration(from: &SyntaxNode, name: &str) -> Option<SyntaxNode> {
    from.ancestors().find_map(|scope| {
        scope
            .descendants(SyntaxKind::VariableDeclaration)
            .find(|decl| declared_name(decl).as_deref() == Some(name))
    })
}

/// Type named in a `new T(...)` initializer of the declaration's first
/// declarator.
#[must_use]
pub fn constructed_type_name(declaration: &SyntaxNode) -> Option<String> {
    let init = initializer(&first_declarator(declaration)?)?;
    if init.kind() != SyntaxKind::ObjectCreation {
        return None;
    }
    let ty = init.children().find(|c| c.kind().is_type())?;
    type_name(&ty)
}

/// Name of a class declaration.
#[must_use]
pub fn class_name(class: &SyntaxNode) -> Option<String> {
    class.identifier().map(|i| i.token_text().to_owned())
}

/// Searches the enclosing scopes of `from` for a class named `name`.
#[must_use]
pub fn find_class(from: &SyntaxNode, name: &str) -> Option<SyntaxNode> {
    from.ancestors().find_map(|scope| {
        scope
            .descendants(SyntaxKind::ClassDeclaration)
            .find(|class| class_name(class).as_deref() == Some(name))
    })
}

/// Body (`{ ... }`) of a class declaration.
#[must_use]
pub fn class_body(class: &SyntaxNode) -> Option<SyntaxNode> {
    class.first_child_of_kind(SyntaxKind::DeclarationList)
}

/// Direct members of a class, in declaration order.
pub fn class_members(class: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    class_body(class)
        .map(|body| body.children().filter(|c| !c.is_token()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
}

/// Name of a method declaration: the identifier right before its parameters.
#[must_use]
pub fn method_name(method: &SyntaxNode) -> Option<String> {
    let params = method.first_child_of_kind(SyntaxKind::ParameterList)?;
    method
        .child(params.index().checked_sub(1)?)
        .filter(|c| c.kind() == SyntaxKind::Identifier)
        .map(|c| c.token_text().to_owned())
}

/// Whether the class itself declares a method called `name`.
#[must_use]
pub fn declares_method(class: &SyntaxNode, name: &str) -> bool {
    class_members(class)
        .filter(|m| m.kind() == SyntaxKind::MethodDeclaration)
        .any(|m| method_name(&m).as_deref() == Some(name))
}

/// Names of the class's direct fields, in declaration order.
///
/// Only the first declarator of each field declaration is listed.
#[must_use]
pub fn field_names(class: &SyntaxNode) -> Vec<String> {
    class_members(class)
        .filter(|m| m.kind() == SyntaxKind::FieldDeclaration)
        .filter_map(|field| field.first_child_of_kind(SyntaxKind::VariableDeclaration))
        .filter_map(|decl| declared_name(&decl))
        .collect()
}

/// Name of the class's base type: the first entry of its base list.
#[must_use]
pub fn base_type_name(class: &SyntaxNode) -> Option<String> {
    let base = class
        .first_child_of_kind(SyntaxKind::BaseList)?
        .first_child_of_kind(SyntaxKind::BaseTypeReference)?;
    type_name(&base.first_inner_child().or_else(|| base.child(0))?)
}

/// One step of an inheritance chain walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseResolution {
    /// The base class was found.
    Resolved(SyntaxNode),
    /// The chain ends here: no base list, or a base spelled `object`.
    Terminal,
    /// A base is named but no class declaration with that name was found.
    NotFound(String),
}

/// Resolves the base class of `class`.
#[must_use]
pub fn resolve_base(class: &SyntaxNode) -> BaseResolution {
    let Some(name) = base_type_name(class) else {
        return BaseResolution::Terminal;
    };
    if name.eq_ignore_ascii_case(ROOT_TYPE) {
        return BaseResolution::Terminal;
    }
    match find_class(class, &name) {
        Some(base) => BaseResolution::Resolved(base),
        None => BaseResolution::NotFound(name),
    }
}

/// Whether `class` or any resolvable ancestor declares a method `name`.
///
/// The walk stops at a terminal base, at an unresolvable base, or when a
/// class is reached twice (cyclic inheritance).
#[must_use]
pub fn chain_declares_method(class: &SyntaxNode, name: &str) -> bool {
    let mut visited = FxHashSet::default();
    let mut current = class.clone();
    loop {
        if !visited.insert(current.clone()) {
            return false;
        }
        if declares_method(&current, name) {
            return true;
        }
        match resolve_base(&current) {
            BaseResolution::Resolved(base) => current = base,
            BaseResolution::Terminal | BaseResolution::NotFound(_) => return false,
        }
    }
}

/// Receiver of a `.ToString()` access and the class it was constructed from.
#[derive(Debug, Clone)]
pub struct ReceiverClass {
    /// Receiver identifier text.
    pub receiver: String,
    /// Declaration of the receiver variable.
    pub declaration: SyntaxNode,
    /// Class named in the receiver's `new` expression.
    pub class: SyntaxNode,
}

/// Resolves receiver → declaration → constructed type → class declaration.
#[must_use]
pub fn resolve_receiver_class(access: &SyntaxNode) -> Option<ReceiverClass> {
    let receiver = simple_receiver(access)?.token_text().to_owned();
    let declaration = find_declaration(access, &receiver)?;
    let type_name = constructed_type_name(&declaration)?;
    let class = find_class(access, &type_name)?;
    Some(ReceiverClass {
        receiver,
        declaration,
        class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_source;
    use crate::syntax::SyntaxTree;

    fn class_named(tree: &SyntaxTree, name: &str) -> SyntaxNode {
        tree.root()
            .descendants(SyntaxKind::ClassDeclaration)
            .find(|c| class_name(c).as_deref() == Some(name))
            .unwrap()
    }

    #[test]
    fn test_type_name_shapes() {
        let tree = parse_source(
            "class A { void M() { var a = new Foo(); var b = new Sys.Bar(); var c = new List<int>(); } }",
        )
        .unwrap();
        let names: Vec<Option<String>> = tree
            .root()
            .descendants(SyntaxKind::VariableDeclaration)
            .map(|d| constructed_type_name(&d))
            .collect();
        assert_eq!(
            names,
            [
                Some("Foo".to_owned()),
                Some("Bar".to_owned()),
                Some("List".to_owned())
            ]
        );
    }

    #[test]
    fn test_member_name_and_receiver() {
        let tree = parse_source("class A { void M() { a.ToString(); this.b.ToString(); } }").unwrap();
        let accesses: Vec<SyntaxNode> = tree
            .root()
            .descendants(SyntaxKind::MemberAccess)
            .filter(|a| member_name(a).is_some_and(|m| m.token_text() == TO_STRING))
            .collect();
        assert_eq!(accesses.len(), 2);
        assert_eq!(simple_receiver(&accesses[0]).unwrap().token_text(), "a");
        assert!(simple_receiver(&accesses[1]).is_none());
    }

    #[test]
    fn test_method_name_skips_return_type() {
        let tree = parse_source("class A { Foo Create() { return null; } }").unwrap();
        let method = tree.root().descendants(SyntaxKind::MethodDeclaration).next().unwrap();
        assert_eq!(method_name(&method).as_deref(), Some("Create"));
    }

    #[test]
    fn test_field_names_in_order() {
        let tree = parse_source("class A { int b; int a, c; void M() { int local; } }").unwrap();
        assert_eq!(field_names(&class_named(&tree, "A")), ["b", "a"]);
    }

    #[test]
    fn test_resolve_base_outcomes() {
        let tree = parse_source(
            "class A { } class B : A { } class C : object { } class D : Missing { }",
        )
        .unwrap();
        assert_eq!(resolve_base(&class_named(&tree, "A")), BaseResolution::Terminal);
        assert_eq!(
            resolve_base(&class_named(&tree, "B")),
            BaseResolution::Resolved(class_named(&tree, "A"))
        );
        assert_eq!(resolve_base(&class_named(&tree, "C")), BaseResolution::Terminal);
        assert_eq!(
            resolve_base(&class_named(&tree, "D")),
            BaseResolution::NotFound("Missing".to_owned())
        );
    }

    #[test]
    fn test_chain_walk_finds_inherited_method() {
        let tree = parse_source(
            "class A { public override string ToString() { return \"\"; } } class B : A { } class C : B { }",
        )
        .unwrap();
        assert!(chain_declares_method(&class_named(&tree, "C"), TO_STRING));
    }

    #[test]
    fn test_chain_walk_survives_cycles() {
        let tree = parse_source("class A : B { } class B : A { }").unwrap();
        assert!(!chain_declares_method(&class_named(&tree, "A"), TO_STRING));
    }
}
