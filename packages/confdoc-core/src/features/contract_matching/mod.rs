//! Contract Matching Feature
//!
//! Finds the types of a `DeclUniverse` whose method set covers a capability
//! interface, value and pointer receivers alike, and evaluates their keys.
//!
//! ## Structure
//! - `domain/` - Capability, ContractMatch
//! - `infrastructure/` - method sets, static key evaluation
//! - `application/` - MatchContractUseCase

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::MatchContractUseCase;
pub use domain::{Capability, ContractMatch};
pub use infrastructure::{KeyEvaluator, MethodSetBuilder};
