//! JSON report
//!
//! One array of matched types, written element by element so sections that
//! were rendered before a failure are still in the output.

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use super::strict_tag_error;
use crate::config::RenderConfig;
use crate::features::field_resolution::{FieldNode, MatchedType};
use crate::features::rendering::ports::ReportRenderer;
use crate::shared::models::Result;
use crate::shared::utils::collapse_whitespace;

#[derive(Debug, Serialize)]
struct TypeView<'a> {
    package: &'a str,
    name: &'a str,
    key: Option<&'a str>,
    description: Option<&'a str>,
    fields: Vec<FieldView<'a>>,
}

#[derive(Debug, Serialize)]
struct FieldView<'a> {
    name: &'a str,
    field: &'a str,
    doc: String,
    required: bool,
    example: Option<&'a str>,
    repeated: bool,
    recursive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldView<'a>>>,
}

pub struct JsonRenderer<'c> {
    config: &'c RenderConfig,
    written: usize,
}

impl<'c> JsonRenderer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config, written: 0 }
    }

    fn fields<'a>(&self, owner: &str, nodes: &'a [FieldNode]) -> Result<Vec<FieldView<'a>>> {
        let mut views = Vec::with_capacity(nodes.len());
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

            let fields = match &node.children {
                Some(children) => Some(self.fields(owner, children)?),
                None => None,
            };
            views.push(FieldView {
                name: &node.name,
                field: &node.field,
                doc: collapse_whitespace(&node.doc),
                required: node.required(),
                example: node.example(),
                repeated: node.repeated,
                recursive: node.recursive,
                fields,
            });
        }
        Ok(views)
    }
}

impl ReportRenderer for JsonRenderer<'_> {
    fn begin(&mut self, out: &mut dyn Write, _title: &str) -> Result<()> {
        write!(out, "[")?;
        Ok(())
    }

    fn render_type(&mut self, out: &mut dyn Write, matched: &MatchedType) -> Result<()> {
        let view = TypeView {
            package: &matched.id.package,
            name: &matched.id.name,
            key: if self.config.show_keys {
                matched.key.as_deref()
            } else {
                None
            },
            description: matched.description.as_deref(),
            fields: self.fields(&matched.id.fqn(), &matched.fields)?,
        };

        writeln!(out, "{}", if self.written == 0 { "" } else { "," })?;
        serde_json::to_writer_pretty(&mut *out, &view)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.written > 0 {
            writeln!(out)?;
        }
        writeln!(out, "]")?;
        out.flush()?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}
