//! Error types for the confdoc-core crate
//!
//! Every stage of the pipeline reports through `ConfdocError`. The `kind`
//! decides whether the run stops (`is_fatal`) or continues with the next
//! sibling field or matched type.

use std::fmt;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source tree unreadable or a file fails to parse
    Load,
    /// The nominated capability interface is absent
    CapabilityNotFound,
    /// A matched type's field shape cannot be resolved
    Resolution,
    /// A field has no display-name sub-tag
    TagMissing,
    /// A field tag cannot be parsed
    TagMalformed,
    /// Configuration errors
    Config,
    /// IO errors (writing the report)
    IO,
    /// Report rendering errors
    Render,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Load => "load",
            ErrorKind::CapabilityNotFound => "capability_not_found",
            ErrorKind::Resolution => "resolution",
            ErrorKind::TagMissing => "tag_missing",
            ErrorKind::TagMalformed => "tag_malformed",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
            ErrorKind::Render => "render",
            ErrorKind::Internal => "internal",
        }
    }

    /// Fatal kinds abort the run; the rest skip one type or one field.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ErrorKind::Resolution | ErrorKind::TagMissing | ErrorKind::TagMalformed
        )
    }
}

/// Unified error type
#[derive(Debug)]
pub struct ConfdocError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConfdocError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Load, message)
    }

    pub fn capability_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CapabilityNotFound, message)
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resolution, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for ConfdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfdocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ConfdocError>;

impl From<std::io::Error> for ConfdocError {
    fn from(err: std::io::Error) -> Self {
        ConfdocError::new(ErrorKind::IO, format!("IO error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for ConfdocError {
    fn from(err: serde_json::Error) -> Self {
        ConfdocError::render(format!("JSON serialization error: {}", err)).with_source(err)
    }
}
