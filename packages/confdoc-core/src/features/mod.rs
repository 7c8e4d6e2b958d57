//! Feature modules
//!
//! Vertical slices in pipeline order: parsing → contract_matching →
//! field_resolution (with tag_parsing) → rendering.

pub mod contract_matching;
pub mod field_resolution;
pub mod parsing;
pub mod rendering;
pub mod tag_parsing;
