//! Field resolution application layer

pub mod resolve_fields;

pub use resolve_fields::ResolveFieldsUseCase;
