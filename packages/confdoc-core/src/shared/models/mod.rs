//! Shared models

mod error;
mod span;

pub use error::{ConfdocError, ErrorKind, Result};
pub use span::Span;
