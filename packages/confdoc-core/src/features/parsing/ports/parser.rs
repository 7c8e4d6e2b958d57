//! Parser port (interface)
//!
//! Defines the contract for turning one source file into declarations.

use crate::features::parsing::domain::SourceUnit;
use crate::shared::models::Result;

/// Parser trait - abstraction over the parsing implementation
pub trait DeclarationParser: Send + Sync {
    /// Parse source code into the declarations of one file.
    ///
    /// A file that does not parse cleanly is an error of kind `Load`.
    fn parse_unit(&self, source: &str, file_path: &str) -> Result<SourceUnit>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
