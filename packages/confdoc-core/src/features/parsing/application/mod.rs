//! Parsing application layer

pub mod load_universe;

pub use load_universe::LoadUniverseUseCase;
