//! Rendering infrastructure

pub mod json_renderer;
pub mod text_renderer;

pub use json_renderer::JsonRenderer;
pub use text_renderer::TextRenderer;

use crate::features::field_resolution::FieldNode;
use crate::shared::models::ConfdocError;

/// Error for a field whose tag failed to parse, under strict tags
pub(crate) fn strict_tag_error(owner: &str, node: &FieldNode) -> Option<ConfdocError> {
    node.tag_error.as_ref().map(|e| {
        let err: ConfdocError = e.clone().into();
        ConfdocError {
            message: format!("Field {}.{}: {}", owner, node.field, err.message),
            ..err
        }
    })
}
