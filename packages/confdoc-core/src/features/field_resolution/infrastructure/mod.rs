//! Field resolution infrastructure

pub mod active_path;
pub mod shape_unwrapper;

pub use active_path::ActivePath;
pub use shape_unwrapper::{Resolved, ShapeUnwrapper, Unwrapped};
