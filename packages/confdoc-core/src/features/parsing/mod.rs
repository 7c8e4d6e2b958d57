//! Parsing Feature (Declaration Loader)
//!
//! Loads every Go type declaration reachable from a root directory into an
//! immutable `DeclUniverse`.
//!
//! ## Structure
//! - `domain/` - Declaration universe IR (TypeDecl, FieldDecl, Shape, ...)
//! - `ports/` - DeclarationParser trait
//! - `application/` - LoadUniverseUseCase
//! - `infrastructure/` - tree-sitter Go parser, directory walker, linker

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::LoadUniverseUseCase;
pub use domain::{
    ConstExpr, DeclUniverse, FieldDecl, InterfaceShape, MethodDecl, MethodSig, Package,
    ReceiverKind, Shape, TypeDecl, TypeId, UNIVERSE_VERSION,
};
pub use infrastructure::GoDeclarationParser;
pub use ports::DeclarationParser;

/// Load the declaration universe under `root` with the Go parser.
pub fn load_universe(
    root: &std::path::Path,
    config: &crate::config::LoaderConfig,
) -> crate::shared::models::Result<DeclUniverse> {
    LoadUniverseUseCase::new(GoDeclarationParser::new(), config).execute(root)
}

/// In-memory universe builder for unit tests of later stages
#[cfg(test)]
pub(crate) mod testing {
    use super::infrastructure::{link, PackageUnits};
    use super::{DeclUniverse, DeclarationParser, GoDeclarationParser};
    use std::path::PathBuf;

    /// Link `(path, source)` files; files sharing a directory form one package
    /// whose id is `example.com/app/<dir>`.
    pub fn universe(files: &[(&str, &str)]) -> DeclUniverse {
        let parser = GoDeclarationParser::new();
        let mut packages: Vec<PackageUnits> = Vec::new();

        for (path, source) in files {
            let unit = parser.parse_unit(source, path).unwrap();
            let dir = path.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
            let id = if dir.is_empty() {
                "example.com/app".to_string()
            } else {
                format!("example.com/app/{}", dir)
            };
            match packages.iter_mut().find(|p| p.id == id) {
                Some(pkg) => pkg.units.push(unit),
                None => packages.push(PackageUnits {
                    id,
                    name: unit.package_name.clone(),
                    dir: PathBuf::from(dir),
                    units: vec![unit],
                }),
            }
        }

        link(packages)
    }
}
