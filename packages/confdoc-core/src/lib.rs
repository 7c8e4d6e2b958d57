/*
 * confdoc - configuration reference generator for Go sources
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (ConfdocError, Span) and Go string helpers
 * - features/    : Vertical slices (parsing → contract_matching → field_resolution → rendering)
 * - pipeline/    : Orchestration
 * - config/      : DocsConfig (YAML v1)
 */

#![allow(clippy::new_without_default)] // Use cases are built explicitly
#![allow(clippy::module_inception)] // Module naming intentional

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Log subscriber set-up
pub mod logging;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{DocsConfig, OutputFormat};
pub use features::field_resolution::{FieldNode, MatchedType};
pub use features::parsing::{load_universe, DeclUniverse};
pub use features::tag_parsing::ParsedTag;
pub use pipeline::{DocsPipeline, RunSummary};
pub use shared::models::{ConfdocError, ErrorKind, Result};
