//! Shared module - Common types and utilities
//!
//! This module contains types that are shared across all features.
//! It has no tree-sitter dependency; features convert syntax positions into `Span`.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
