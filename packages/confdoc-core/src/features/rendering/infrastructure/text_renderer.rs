//! Indented text report
//!
//! ```text
//! Section implementors
//! example.com/app/internal/server.Conf (server) # Server configuration
//!     listenAddr: ":3592" # Address to listen on. [REQUIRED]
//!     tls:
//!         cert: # Path to the certificate.
//!     listeners:
//!         -
//!         name: "main"
//! ```

use std::io::Write;
use tracing::debug;

use super::strict_tag_error;
use crate::config::RenderConfig;
use crate::features::field_resolution::{FieldNode, MatchedType};
use crate::features::rendering::ports::ReportRenderer;
use crate::shared::models::Result;
use crate::shared::utils::collapse_whitespace;

const REQUIRED_MARKER: &str = "[REQUIRED]";
const REPETITION_MARKER: &str = "-";

pub struct TextRenderer<'c> {
    config: &'c RenderConfig,
}

impl<'c> TextRenderer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(self.config.indent_width * depth)
    }

    fn header(&self, matched: &MatchedType) -> String {
        let mut line = matched.id.fqn();
        if self.config.show_keys {
            if let Some(key) = &matched.key {
                line.push_str(&format!(" ({})", key));
            }
        }
        if let Some(description) = matched.description.as_deref().map(collapse_whitespace) {
            if !description.is_empty() {
                line.push_str(" # ");
                line.push_str(&description);
            }
        }
        line
    }

    fn row(&self, node: &FieldNode, depth: usize) -> String {
        let mut line = format!("{}{}:", self.indent(depth), node.name);
        if !node.has_children() {
            let example = node.example().map(collapse_whitespace).unwrap_or_default();
            if !example.is_empty() {
                line.push(' ');
                line.push_str(&example);
            }
        }
        let doc = collapse_whitespace(&node.doc);
        if !doc.is_empty() {
            line.push_str(" # ");
            line.push_str(&doc);
        }
        if node.required() {
            line.push(' ');
            line.push_str(REQUIRED_MARKER);
        }
        line
    }

    fn fields(
        &self,
        out: &mut dyn Write,
        owner: &str,
        nodes: &[FieldNode],
        depth: usize,
    ) -> Result<()> {
        for node in nodes {
            if node.tag_error.is_some() {
                if self.config.strict_tags {
                    if let Some(err) = strict_tag_error(owner, node) {
                        return Err(err);
                    }
                }
                debug!("Not rendering {}.{}", owner, node.field);
                continue;
            }

            writeln!(out, "{}", self.row(node, depth))?;

            if let Some(children) = &node.children {
                if node.repeated {
                    writeln!(out, "{}{}", self.indent(depth + 1), REPETITION_MARKER)?;
                }
                self.fields(out, owner, children, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl ReportRenderer for TextRenderer<'_> {
    fn begin(&mut self, out: &mut dyn Write, title: &str) -> Result<()> {
        writeln!(out, "{}", title.trim_end())?;
        Ok(())
    }

    fn render_type(&mut self, out: &mut dyn Write, matched: &MatchedType) -> Result<()> {
        writeln!(out, "{}", self.header(matched))?;
        self.fields(out, &matched.id.fqn(), &matched.fields, 1)
    }

    fn finish(&mut self, out: &mut dyn Write) -> Result<()> {
        out.flush()?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "text"
    }
}
