//! Top-level docs configuration
//!
//! Built once at start-up (defaults, then the YAML file, then CLI overrides),
//! validated, and passed by reference to every stage.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::io::{DocsConfigFileV1, SUPPORTED_VERSIONS};
use super::sections::{CapabilityConfig, LoaderConfig, RenderConfig, TagConfig};
use super::validation::Validatable;

/// Complete configuration of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    pub capability: CapabilityConfig,
    pub tags: TagConfig,
    pub loader: LoaderConfig,
    pub render: RenderConfig,
}

impl DocsConfig {
    /// Load a v1 YAML file over the defaults
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: DocsConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                });
            }
            Some(_) => {}
        }

        let defaults = Self::default();
        Ok(Self {
            capability: file.capability.unwrap_or(defaults.capability),
            tags: file.tags.unwrap_or(defaults.tags),
            loader: file.loader.unwrap_or(defaults.loader),
            render: file.render.unwrap_or(defaults.render),
        })
    }

    /// Export as a v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = DocsConfigFileV1 {
            version: Some(1),
            capability: Some(self.capability.clone()),
            tags: Some(self.tags.clone()),
            loader: Some(self.loader.clone()),
            render: Some(self.render.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    /// Title line of the text report
    pub fn title(&self) -> String {
        self.render
            .title
            .clone()
            .unwrap_or_else(|| format!("{} implementors", self.capability.name))
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        let sections: [&dyn Validatable; 4] =
            [&self.capability, &self.tags, &self.loader, &self.render];
        for section in sections {
            if let Err(e) = Validatable::validate(section) {
                debug!("{} failed validation", section.config_name());
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Validatable for DocsConfig {
    fn validate(&self) -> ConfigResult<()> {
        DocsConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "DocsConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = DocsConfig::default();
        config.render.indent_width = 2;
        config.capability.package = Some("example.com/app/config".to_string());

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("indent_width: 2"));

        assert_eq!(DocsConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
capability:
  name: Configurable
tags:
  name_key: json
render:
  format: json
  strict_tags: true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = DocsConfig::from_yaml(temp_file.path()).unwrap();
        assert_eq!(config.capability.name, "Configurable");
        assert_eq!(config.tags.name_key, "json");
        assert_eq!(config.tags.attributes_key, "conf");
        assert_eq!(config.render.format, OutputFormat::Json);
        assert!(config.render.strict_tags);
        assert_eq!(config.title(), "Configurable implementors");
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = DocsConfig::from_yaml_str("capability:\n  name: Section\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = DocsConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_format_suggests() {
        let err = DocsConfig::from_yaml_str("version: 1\nrender:\n  format: jsn\n").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'json'?"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = DocsConfig::from_yaml("/nonexistent/confdoc.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_custom_title() {
        let mut config = DocsConfig::default();
        assert_eq!(config.title(), "Section implementors");
        config.render.title = Some("Configuration reference".to_string());
        assert_eq!(config.title(), "Configuration reference");
    }
}
