//! Shared utilities

pub mod go_strings;

pub use go_strings::{collapse_whitespace, unescape, unquote};
