//! Tag parsing types

use serde::Serialize;

/// Normalized field metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedTag {
    /// Display name, never empty
    pub name: String,
    pub required: bool,
    pub example: Option<String>,
}

impl ParsedTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// `key:"value"` pair of a struct tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTag {
    pub key: String,
    /// Value with string-literal escapes resolved
    pub value: String,
}
