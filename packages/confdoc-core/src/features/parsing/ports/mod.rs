//! Parsing ports

pub mod parser;

pub use parser::DeclarationParser;
