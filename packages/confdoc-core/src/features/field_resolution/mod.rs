//! Field Resolution Feature
//!
//! Expands a matched type's struct shape into a `FieldNode` tree: pointers are
//! looked through, sequences set the repetition flag, named types are followed,
//! embedded structs are spliced, and cycles end in a leaf.
//!
//! ## Structure
//! - `domain/` - FieldNode, MatchedType
//! - `infrastructure/` - ActivePath, ShapeUnwrapper
//! - `application/` - ResolveFieldsUseCase

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ResolveFieldsUseCase;
pub use domain::{FieldNode, MatchedType};
