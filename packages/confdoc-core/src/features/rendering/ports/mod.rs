//! Rendering ports

pub mod renderer;

pub use renderer::ReportRenderer;
