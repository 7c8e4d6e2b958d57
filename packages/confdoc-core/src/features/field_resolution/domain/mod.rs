//! Field resolution domain models

mod field_node;

pub use field_node::{FieldNode, MatchedType};
