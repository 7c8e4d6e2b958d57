//! Renderer port (interface)
//!
//! A report is written incrementally: `begin`, one `render_type` per matched
//! type as soon as it is resolved, then `finish`. Whatever was written before
//! an error stays written.

use std::io::Write;

use crate::features::field_resolution::MatchedType;
use crate::shared::models::Result;

pub trait ReportRenderer {
    fn begin(&mut self, out: &mut dyn Write, title: &str) -> Result<()>;

    /// Write one section. Fails only on write errors, or on a field with a
    /// tag error when tags are strict.
    fn render_type(&mut self, out: &mut dyn Write, matched: &MatchedType) -> Result<()>;

    fn finish(&mut self, out: &mut dyn Write) -> Result<()>;

    /// Format name, for logs
    fn format_name(&self) -> &'static str;
}
