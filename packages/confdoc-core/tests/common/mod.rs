//! Common test utilities for confdoc-core
//!
//! Go source fixtures on a temporary directory plus report assertions.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
