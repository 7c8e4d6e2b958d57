//! Tag Parsing Feature
//!
//! Struct tag lexing and the display-name / attributes model.

mod error;
mod lexer;
mod parser;
mod types;

pub use error::{TagError, TagResult};
pub use lexer::{lex_struct_tag, split_attributes, strip_quotes};
pub use parser::{TagParser, IGNORE_NAME};
pub use types::{ParsedTag, SubTag};
