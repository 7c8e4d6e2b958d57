//! Contract matching infrastructure

pub mod key_evaluator;
pub mod method_set;

pub use key_evaluator::KeyEvaluator;
pub use method_set::MethodSetBuilder;
