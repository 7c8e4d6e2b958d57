//! Log subscriber set-up
//!
//! Logs always go to stderr; stdout carries only the report.

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "confdoc_core=info,confdoc=info";

/// Filter used when `RUST_LOG` is unset and verbose output was asked for
pub const VERBOSE_FILTER: &str = "confdoc_core=debug,confdoc=debug";

/// Environment variable selecting `json` or `pretty` (default) output
pub const LOG_FORMAT_ENV: &str = "CONFDOC_LOG_FORMAT";

/// Initialize tracing
///
/// Uses `RUST_LOG` when set. `CONFDOC_LOG_FORMAT=json` switches to JSON lines.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        _ => {
            registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}
