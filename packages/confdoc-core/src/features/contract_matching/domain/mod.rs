//! Contract matching domain models

mod capability;

pub use capability::{Capability, ContractMatch};
