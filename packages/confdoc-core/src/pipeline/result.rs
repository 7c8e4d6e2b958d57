//! Pipeline result types

use serde::Serialize;
use std::time::Duration;

/// Counters of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Types loaded into the universe
    pub types_loaded: usize,
    /// Types implementing the capability
    pub matched: usize,
    /// Sections written
    pub rendered: usize,
    /// Types skipped on a resolution error
    pub skipped_types: usize,
    /// Fields left out on a tag error
    pub skipped_fields: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped_types == 0 && self.skipped_fields == 0
    }
}
