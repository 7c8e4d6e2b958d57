//! Docs pipeline
//!
//! load → match → for each match: resolve → render. Each section is written
//! as soon as its type is resolved, so a fatal error later in the run leaves
//! the earlier sections in place.

use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::result::RunSummary;
use crate::config::DocsConfig;
use crate::features::contract_matching::MatchContractUseCase;
use crate::features::field_resolution::ResolveFieldsUseCase;
use crate::features::parsing::{GoDeclarationParser, LoadUniverseUseCase};
use crate::features::rendering::renderer_for;
use crate::shared::models::Result;

pub struct DocsPipeline<'c> {
    config: &'c DocsConfig,
}

impl<'c> DocsPipeline<'c> {
    pub fn new(config: &'c DocsConfig) -> Self {
        Self { config }
    }

    /// Run over the source tree at `root`, writing the report to `out`
    pub fn run(&self, root: &Path, out: &mut dyn Write) -> Result<RunSummary> {
        let start = Instant::now();
        self.config.validate()?;

        let universe =
            LoadUniverseUseCase::new(GoDeclarationParser::new(), &self.config.loader).execute(root)?;

        let (capability, matches) =
            MatchContractUseCase::new(&universe, &self.config.capability).execute()?;
        debug!("Using capability {}", capability.id);

        let resolver = ResolveFieldsUseCase::new(&universe, &self.config.tags);
        let mut renderer = renderer_for(&self.config.render);
        let mut summary = RunSummary {
            types_loaded: universe.len(),
            matched: matches.len(),
            ..Default::default()
        };

        renderer.begin(out, &self.config.title())?;
        for matched in &matches {
            let resolved = match resolver.execute(matched) {
                Ok(resolved) => resolved,
                Err(e) if !e.is_fatal() => {
                    warn!("Skipping {}: {}", matched.id, e);
                    summary.skipped_types += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            summary.skipped_fields += resolved.tag_error_count();
            renderer.render_type(out, &resolved)?;
            summary.rendered += 1;
        }
        renderer.finish(out)?;

        summary.elapsed = start.elapsed();
        info!(
            "Rendered {} of {} matched types as {} ({} types skipped, {} fields skipped) in {:?}",
            summary.rendered,
            summary.matched,
            renderer.format_name(),
            summary.skipped_types,
            summary.skipped_fields,
            summary.elapsed
        );
        Ok(summary)
    }
}
