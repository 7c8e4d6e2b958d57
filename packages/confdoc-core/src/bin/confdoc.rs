//! confdoc CLI
//!
//! # Usage
//!
//! ```bash
//! # Document every implementor of `Section` under the current directory
//! confdoc
//!
//! # Pick the interface and the output format
//! confdoc --root ../app --capability Section --capability-package example.com/app/internal/config --format json
//!
//! # Settings from a YAML file (schema v1), flags still win
//! confdoc --config confdoc.yaml --strict-tags
//! ```

use clap::Parser;
use confdoc_core::config::{DocsConfig, OutputFormat};
use confdoc_core::{logging, DocsPipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "confdoc")]
#[command(about = "Generate configuration reference docs from Go struct declarations", long_about = None)]
struct Cli {
    /// Root of the Go source tree
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// YAML configuration file (schema v1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Capability interface name
    #[arg(long)]
    capability: Option<String>,

    /// Import path of the package declaring the capability
    #[arg(long)]
    capability_package: Option<String>,

    /// Output format: text or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Fail on the first field whose tag cannot be parsed
    #[arg(long)]
    strict_tags: bool,

    /// Build tags satisfied by `//go:build` lines (comma-separated)
    #[arg(long, value_delimiter = ',')]
    build_tags: Option<Vec<String>>,

    /// Load `_test.go` files
    #[arg(long)]
    include_tests: bool,

    /// Debug logging (when RUST_LOG is unset)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the YAML file, then flags
    fn docs_config(&self) -> Result<DocsConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => DocsConfig::from_yaml(path)?,
            None => DocsConfig::default(),
        };

        if let Some(name) = &self.capability {
            config.capability.name = name.clone();
        }
        if let Some(package) = &self.capability_package {
            config.capability.package = Some(package.clone());
        }
        if let Some(format) = self.format {
            config.render.format = format;
        }
        if self.strict_tags {
            config.render.strict_tags = true;
        }
        if let Some(tags) = &self.build_tags {
            config.loader.build_tags = tags.clone();
        }
        if self.include_tests {
            config.loader.include_tests = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("confdoc: failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("confdoc: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.docs_config()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    DocsPipeline::new(&config).run(&cli.root, &mut out)?;
    Ok(())
}
