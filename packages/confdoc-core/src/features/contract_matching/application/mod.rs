//! Contract matching application layer

pub mod match_contract;

pub use match_contract::MatchContractUseCase;
