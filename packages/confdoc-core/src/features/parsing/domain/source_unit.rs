//! Per-file extraction output
//!
//! A `SourceUnit` is what the parser produces for one file, before names are
//! linked across files and packages. Qualifiers (`pkg` in `pkg.Name`) are kept
//! as written; the linker maps them through the file's imports.

use super::declarations::{ConstExpr, MethodSig, ReceiverKind};
use crate::shared::models::Span;

/// Type expression as written in source
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Unqualified identifier, e.g. `Conf` or `string`
    Ident(String),
    /// `pkg.Name`
    Qualified { qualifier: String, name: String },
    Pointer(Box<TypeExpr>),
    /// Slice or array
    Sequence(Box<TypeExpr>),
    Struct(Vec<RawField>),
    Interface {
        methods: Vec<MethodSig>,
        embedded: Vec<TypeExpr>,
    },
    Opaque(String),
}

/// Struct field declaration, possibly declaring several names
#[derive(Debug, Clone, PartialEq)]
pub struct RawField {
    /// Empty for an embedded field
    pub names: Vec<String>,
    pub doc: String,
    pub tag: Option<String>,
    pub ty: TypeExpr,
    pub span: Span,
}

/// Import spec. `alias` is `None` when the package name is implied by the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub alias: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTypeDecl {
    pub name: String,
    pub doc: String,
    pub description: Option<String>,
    pub ty: TypeExpr,
    pub is_alias: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMethod {
    /// Receiver base type name, without `*` or type parameters
    pub receiver: String,
    pub receiver_kind: ReceiverKind,
    pub signature: MethodSig,
    /// `ConstExpr::Qualified` carries the qualifier here, not the import path
    pub returned: Option<ConstExpr>,
    pub span: Span,
}

/// Declarations extracted from one Go file
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    pub file_path: String,
    pub package_name: String,
    pub imports: Vec<Import>,
    pub types: Vec<RawTypeDecl>,
    pub methods: Vec<RawMethod>,
    pub consts: Vec<(String, ConstExpr)>,
}

impl SourceUnit {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty() && self.consts.is_empty()
    }
}
