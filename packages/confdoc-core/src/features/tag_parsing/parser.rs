//! Struct tag parser
//!
//! Turns the raw tag of a field into a `ParsedTag`. Only the display-name
//! sub-tag is mandatory; `required` and `example` are read best-effort from the
//! attributes sub-tag and unknown attribute keys are ignored.

use super::error::{TagError, TagResult};
use super::lexer::{lex_struct_tag, split_attributes, strip_quotes};
use super::types::ParsedTag;
use crate::config::TagConfig;

/// Display name that excludes a field from the report
pub const IGNORE_NAME: &str = "-";

pub struct TagParser<'c> {
    config: &'c TagConfig,
}

impl<'c> TagParser<'c> {
    pub fn new(config: &'c TagConfig) -> Self {
        Self { config }
    }

    /// Parse a raw tag. `Ok(None)` means the field is ignored (`yaml:"-"`).
    pub fn parse(&self, raw: Option<&str>) -> TagResult<Option<ParsedTag>> {
        let missing = || TagError::Missing {
            key: self.config.name_key.clone(),
        };

        let subtags = lex_struct_tag(raw.ok_or_else(missing)?)?;
        let lookup = |key: &str| subtags.iter().find(|s| s.key == key).map(|s| s.value.as_str());

        let name_value = lookup(&self.config.name_key).ok_or_else(missing)?;
        let name = name_value.split(',').next().unwrap_or_default();
        if name == IGNORE_NAME {
            return Ok(None);
        }
        if name.is_empty() {
            return Err(TagError::malformed(
                0,
                format!("`{}` tag has an empty name", self.config.name_key),
            ));
        }

        let mut tag = ParsedTag::new(name);
        if let Some(attributes) = lookup(&self.config.attributes_key) {
            self.apply_attributes(&mut tag, attributes);
        }
        Ok(Some(tag))
    }

    fn apply_attributes(&self, tag: &mut ParsedTag, attributes: &str) {
        let mut tokens = split_attributes(attributes).into_iter().map(str::trim);

        if tokens.next() == Some(self.config.required_marker.as_str()) {
            tag.required = true;
        }

        for token in tokens {
            if let Some((key, value)) = token.split_once('=') {
                if key.trim() == self.config.example_key {
                    tag.example = Some(strip_quotes(value).to_string());
                }
            }
        }
    }
}
