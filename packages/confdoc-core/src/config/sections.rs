//! Section configuration types
//!
//! One struct per `DocsConfig` section, each with its own validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

static GO_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").expect("valid regex"));

// ============================================================================
// Capability
// ============================================================================

/// The interface whose implementors get documented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapabilityConfig {
    /// Interface type name
    pub name: String,

    /// Import path of the package declaring it. `None` picks the first
    /// interface with that name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            name: "Section".to_string(),
            package: None,
        }
    }
}

impl CapabilityConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !GO_IDENTIFIER.is_match(&self.name) {
            return Err(ConfigError::invalid_value(
                "capability.name",
                &self.name,
                "must be a Go identifier",
            ));
        }
        if let Some(package) = &self.package {
            if package.is_empty() || package.contains(char::is_whitespace) {
                return Err(ConfigError::invalid_value(
                    "capability.package",
                    package,
                    "must be an import path",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tags
// ============================================================================

/// Struct tag keys and markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagConfig {
    /// Sub-tag holding the display name (`yaml:"name"`)
    pub name_key: String,

    /// Sub-tag holding the comma-separated attributes (`conf:"required,example=1"`)
    pub attributes_key: String,

    /// First attribute token marking a field as required
    pub required_marker: String,

    /// Attribute key of the example value
    pub example_key: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            name_key: "yaml".to_string(),
            attributes_key: "conf".to_string(),
            required_marker: "required".to_string(),
            example_key: "example".to_string(),
        }
    }
}

impl TagConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, key) in [
            ("tags.name_key", &self.name_key),
            ("tags.attributes_key", &self.attributes_key),
        ] {
            if key.is_empty()
                || key
                    .chars()
                    .any(|c| c.is_whitespace() || c.is_control() || c == ':' || c == '"')
            {
                return Err(ConfigError::invalid_value(
                    field,
                    key,
                    "tag keys must be non-empty and contain no spaces, colons or quotes",
                ));
            }
        }

        if self.name_key == self.attributes_key {
            return Err(ConfigError::invalid_value(
                "tags.attributes_key",
                &self.attributes_key,
                "must differ from tags.name_key",
            ));
        }

        for (field, marker) in [
            ("tags.required_marker", &self.required_marker),
            ("tags.example_key", &self.example_key),
        ] {
            if marker.is_empty() || marker.contains(',') || marker.contains('=') {
                return Err(ConfigError::invalid_value(
                    field,
                    marker,
                    "markers must be non-empty and contain no ',' or '='",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Source tree loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Tags satisfied when evaluating `//go:build` lines
    pub build_tags: Vec<String>,

    /// Load `*_test.go` files
    pub include_tests: bool,

    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            build_tags: ["linux", "amd64", "unix", "gc"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            include_tests: false,
            skip_dirs: ["vendor", "testdata", "node_modules", "target"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

impl LoaderConfig {
    /// Whether a build tag counts as set. Release tags (`go1.N`) always are.
    pub fn is_tag_set(&self, tag: &str) -> bool {
        tag.starts_with("go1.") || self.build_tags.iter().any(|t| t == tag)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(tag) = self.build_tags.iter().find(|t| {
            t.is_empty()
                || !t
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        }) {
            return Err(ConfigError::invalid_value(
                "loader.build_tags",
                tag,
                "build tags are letters, digits, '_' and '.'",
            ));
        }
        if let Some(dir) = self
            .skip_dirs
            .iter()
            .find(|d| d.is_empty() || d.contains('/'))
        {
            return Err(ConfigError::invalid_value(
                "loader.skip_dirs",
                dir,
                "entries are single directory names",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Render
// ============================================================================

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::unknown_format_with_suggestion(s, &Self::NAMES)),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Report rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub format: OutputFormat,

    /// Spaces per depth level (1..=16)
    pub indent_width: usize,

    /// Title line; defaults to `<Capability> implementors`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Append the evaluated key to each header
    pub show_keys: bool,

    /// Abort on the first field with a tag error instead of skipping it
    pub strict_tags: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            indent_width: 4,
            title: None,
            show_keys: true,
            strict_tags: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.indent_width == 0 || self.indent_width > 16 {
            return Err(ConfigError::range_with_hint(
                "render.indent_width",
                self.indent_width,
                1,
                16,
                "Each depth level needs at least one space",
            ));
        }
        if let Some(title) = &self.title {
            if title.contains('\n') {
                return Err(ConfigError::invalid_value(
                    "render.title",
                    title.escape_debug(),
                    "must be a single line",
                ));
            }
        }
        Ok(())
    }
}

impl Validatable for CapabilityConfig {
    fn validate(&self) -> ConfigResult<()> {
        CapabilityConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "CapabilityConfig"
    }
}

impl Validatable for TagConfig {
    fn validate(&self) -> ConfigResult<()> {
        TagConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "TagConfig"
    }
}

impl Validatable for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        LoaderConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "LoaderConfig"
    }
}

impl Validatable for RenderConfig {
    fn validate(&self) -> ConfigResult<()> {
        RenderConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "RenderConfig"
    }
}
