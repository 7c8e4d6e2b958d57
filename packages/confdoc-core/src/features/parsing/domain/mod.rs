//! Declaration universe domain models

mod declarations;
mod source_unit;
mod universe;

pub use declarations::{
    ConstExpr, FieldDecl, InterfaceShape, MethodDecl, MethodSig, ReceiverKind, Shape, TypeDecl,
    TypeId,
};
pub use source_unit::{Import, RawField, RawMethod, RawTypeDecl, SourceUnit, TypeExpr};
pub use universe::{DeclUniverse, Package, UNIVERSE_VERSION};
