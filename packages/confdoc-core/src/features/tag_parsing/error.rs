//! Error types for tag parsing

use thiserror::Error;

use crate::shared::models::{ConfdocError, ErrorKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The tag, or its display-name sub-tag, is absent
    #[error("missing `{key}` tag")]
    Missing { key: String },

    #[error("malformed tag at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },
}

impl TagError {
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TagError::Missing { .. } => ErrorKind::TagMissing,
            TagError::Malformed { .. } => ErrorKind::TagMalformed,
        }
    }
}

impl From<TagError> for ConfdocError {
    fn from(err: TagError) -> Self {
        ConfdocError::new(err.kind(), err.to_string()).with_source(err)
    }
}

pub type TagResult<T> = Result<T, TagError>;
