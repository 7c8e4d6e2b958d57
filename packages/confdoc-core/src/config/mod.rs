//! Configuration system
//!
//! `DocsConfig` is assembled once per run and passed by reference:
//!
//! ```rust,ignore
//! use confdoc_core::config::DocsConfig;
//!
//! // Defaults
//! let config = DocsConfig::default();
//!
//! // YAML schema v1 over the defaults
//! let config = DocsConfig::from_yaml("confdoc.yaml")?;
//! config.validate()?;
//! ```

pub mod docs_config;
pub mod error;
pub mod io;
pub mod sections;
pub mod validation;

// Re-exports
pub use docs_config::DocsConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::{DocsConfigFileV1, SUPPORTED_VERSIONS};
pub use sections::{CapabilityConfig, LoaderConfig, OutputFormat, RenderConfig, TagConfig};
pub use validation::Validatable;
