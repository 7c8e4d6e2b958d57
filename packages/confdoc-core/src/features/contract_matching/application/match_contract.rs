//! Match contract use case

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::config::CapabilityConfig;
use crate::features::contract_matching::domain::{Capability, ContractMatch};
use crate::features::contract_matching::infrastructure::{KeyEvaluator, MethodSetBuilder};
use crate::features::parsing::domain::{DeclUniverse, TypeDecl};
use crate::shared::models::{ConfdocError, Result};

/// Find every type of the universe implementing the capability
pub struct MatchContractUseCase<'u, 'c> {
    universe: &'u DeclUniverse,
    config: &'c CapabilityConfig,
}

impl<'u, 'c> MatchContractUseCase<'u, 'c> {
    pub fn new(universe: &'u DeclUniverse, config: &'c CapabilityConfig) -> Self {
        Self { universe, config }
    }

    /// Locate the capability interface declaration
    pub fn find_capability(&self) -> Result<Capability> {
        let candidates: Vec<&TypeDecl> = self
            .universe
            .find_by_name(&self.config.name)
            .filter(|decl| decl.shape.is_interface())
            .filter(|decl| match &self.config.package {
                Some(package) => &decl.id.package == package,
                None => true,
            })
            .collect();

        let Some(decl) = candidates.first() else {
            let target = match &self.config.package {
                Some(package) => format!("{}.{}", package, self.config.name),
                None => self.config.name.clone(),
            };
            return Err(ConfdocError::capability_not_found(format!(
                "Capability interface {} not found",
                target
            )));
        };

        for other in &candidates[1..] {
            warn!(
                "Interface {} also matches the capability name; using {} (set capability.package to choose)",
                other.id, decl.id
            );
        }

        let methods = MethodSetBuilder::new(self.universe).interface_methods(decl);
        if methods.is_empty() {
            warn!("Capability {} declares no methods; every type matches", decl.id);
        }
        debug!(
            "Capability {} requires {}",
            decl.id,
            methods
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Capability {
            id: decl.id.clone(),
            methods,
        })
    }

    /// Execute the match, in universe order
    pub fn execute(&self) -> Result<(Capability, Vec<ContractMatch>)> {
        let capability = self.find_capability()?;
        let matches = self.matches(&capability);
        info!("{} types implement {}", matches.len(), capability.id);
        Ok((capability, matches))
    }

    /// Implementors of an already located capability
    pub fn matches(&self, capability: &Capability) -> Vec<ContractMatch> {
        let builder = MethodSetBuilder::new(self.universe);
        let evaluator = KeyEvaluator::new(self.universe);
        let key_method = capability.key_method();

        let mut matches = Vec::new();
        let mut seen_keys: FxHashMap<String, String> = FxHashMap::default();

        for decl in self.universe.types() {
            if !is_candidate(decl, capability) {
                continue;
            }
            let method_set = builder.type_methods(decl);
            if !capability.is_satisfied_by(|m| method_set.contains(m)) {
                continue;
            }

            let key = key_method.and_then(|sig| {
                decl.method(&sig.name)
                    .and_then(|m| m.returned.as_ref())
                    .and_then(|expr| evaluator.evaluate(&decl.id.package, expr))
            });
            match &key {
                Some(key) => {
                    if let Some(first) = seen_keys.get(key) {
                        warn!("{} reports key {:?} already used by {}", decl.id, key, first);
                    } else {
                        seen_keys.insert(key.clone(), decl.id.fqn());
                    }
                }
                None if key_method.is_some() => {
                    debug!("Key of {} is not a compile-time constant", decl.id)
                }
                None => {}
            }

            debug!("Matched {}", decl.id);
            matches.push(ContractMatch {
                id: decl.id.clone(),
                key,
            });
        }

        matches
    }
}

fn is_candidate(decl: &TypeDecl, capability: &Capability) -> bool {
    if decl.id == capability.id || !decl.exported || decl.shape.is_interface() {
        return false;
    }
    if decl.is_alias {
        debug!("Skipping alias {}", decl.id);
        return false;
    }
    true
}
