//! Rendering Feature
//!
//! Writes matched types as an indented text report or a JSON document.
//!
//! ## Structure
//! - `ports/` - ReportRenderer trait
//! - `infrastructure/` - TextRenderer, JsonRenderer

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{JsonRenderer, TextRenderer};
pub use ports::ReportRenderer;

use crate::config::{OutputFormat, RenderConfig};

/// Renderer for the configured format
pub fn renderer_for(config: &RenderConfig) -> Box<dyn ReportRenderer + '_> {
    match config.format {
        OutputFormat::Text => Box::new(TextRenderer::new(config)),
        OutputFormat::Json => Box::new(JsonRenderer::new(config)),
    }
}
