//! Configuration file schema
//!
//! Loading lives in docs_config.rs; this module only defines the YAML shape.

use super::sections::{CapabilityConfig, LoaderConfig, RenderConfig, TagConfig};
use serde::{Deserialize, Serialize};

/// Versions this build reads
pub const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
///
/// Every section is optional; missing sections and missing keys keep their
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<CapabilityConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<LoaderConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_keep_defaults() {
        let file: DocsConfigFileV1 = serde_yaml::from_str(
            r#"
version: 1
render:
  indent_width: 2
"#,
        )
        .unwrap();

        let render = file.render.unwrap();
        assert_eq!(render.indent_width, 2);
        assert!(render.show_keys);
        assert!(file.capability.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<DocsConfigFileV1, _> = serde_yaml::from_str(
            r#"
version: 1
render:
  indent: 2
"#,
        );
        assert!(result.is_err());

        let result: Result<DocsConfigFileV1, _> =
            serde_yaml::from_str("version: 1\noutput: docs.txt\n");
        assert!(result.is_err());
    }
}
