//! Linked declarations
//!
//! These are the nodes of the declaration universe. References between
//! declarations go through `TypeId`, never through owned copies, so the
//! graph may contain cycles.

use serde::Serialize;
use std::fmt;

use crate::shared::models::Span;

/// Identity of a declared type: (package import path, type name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId {
    pub package: String,
    pub name: String,
}

impl TypeId {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Fully-qualified name `<import path>.<Type>`
    pub fn fqn(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Structural category of a type expression
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Struct with fields in declaration order
    Struct(Vec<FieldDecl>),
    /// `*T`
    Pointer(Box<Shape>),
    /// `[]T` or `[N]T`
    Sequence(Box<Shape>),
    /// Reference to another declaration in the universe
    Named(TypeId),
    /// Interface method set
    Interface(InterfaceShape),
    /// Anything the pipeline does not look into (builtins, maps, generics, foreign types)
    Opaque(String),
}

impl Shape {
    pub fn is_struct(&self) -> bool {
        matches!(self, Shape::Struct(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Shape::Interface(_))
    }

    /// The declaration this shape names, looking through one pointer.
    pub fn named_target(&self) -> Option<&TypeId> {
        match self {
            Shape::Named(id) => Some(id),
            Shape::Pointer(inner) => match inner.as_ref() {
                Shape::Named(id) => Some(id),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Interface body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceShape {
    pub methods: Vec<MethodSig>,
    /// Embedded interfaces, `Named` when found in the universe
    pub embedded: Vec<Shape>,
}

/// Struct field. `name` is `None` for embedded fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: Option<String>,
    pub doc: String,
    /// Tag content without the surrounding string-literal quotes
    pub tag: Option<String>,
    pub shape: Shape,
    pub span: Span,
}

impl FieldDecl {
    pub fn is_embedded(&self) -> bool {
        self.name.is_none()
    }
}

/// Method signature with parameter names dropped
///
/// Parameter and result types are kept as whitespace-normalised source text,
/// which is what two signatures are compared on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<String>,
    pub results: Vec<String>,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, params: Vec<String>, results: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
        }
    }
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))?;
        match self.results.len() {
            0 => Ok(()),
            1 => write!(f, " {}", self.results[0]),
            _ => write!(f, " ({})", self.results.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    Value,
    Pointer,
}

/// Method attached to a declared type
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub signature: MethodSig,
    pub receiver: ReceiverKind,
    /// Expression of a body consisting of a single `return <expr>`
    pub returned: Option<ConstExpr>,
    pub span: Span,
}

/// Compile-time string expression, as far as key evaluation cares
#[derive(Debug, Clone, PartialEq)]
pub enum ConstExpr {
    Literal(String),
    /// Same-package constant
    Local(String),
    /// Constant of another package, qualifier already mapped to its import path
    Qualified { package: String, name: String },
    Concat(Box<ConstExpr>, Box<ConstExpr>),
    Unknown(String),
}

/// Declared type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub id: TypeId,
    pub exported: bool,
    pub doc: String,
    /// `+desc=` directive from the doc comment
    pub description: Option<String>,
    pub shape: Shape,
    /// Declared with `type A = B`
    pub is_alias: bool,
    pub methods: Vec<MethodDecl>,
    pub file_path: String,
    pub span: Span,
}

impl TypeDecl {
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.signature.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_fqn() {
        let id = TypeId::new("example.com/app/internal/server", "Conf");
        assert_eq!(id.fqn(), "example.com/app/internal/server.Conf");
    }

    #[test]
    fn test_method_sig_display() {
        let sig = MethodSig::new("Key", vec![], vec!["string".to_string()]);
        assert_eq!(sig.to_string(), "Key() string");

        let sig = MethodSig::new(
            "Read",
            vec!["[]byte".to_string()],
            vec!["int".to_string(), "error".to_string()],
        );
        assert_eq!(sig.to_string(), "Read([]byte) (int, error)");
    }

    #[test]
    fn test_named_target_through_pointer() {
        let id = TypeId::new("pkg", "Inner");
        let shape = Shape::Pointer(Box::new(Shape::Named(id.clone())));
        assert_eq!(shape.named_target(), Some(&id));
        assert_eq!(Shape::Opaque("int".into()).named_target(), None);
    }
}
