//! Load universe use case

use std::path::Path;
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::features::parsing::domain::{DeclUniverse, SourceUnit};
use crate::features::parsing::infrastructure::source_walker::relative_path;
use crate::features::parsing::infrastructure::{
    discover_package_dirs, find_go_build_line, link, package_id, read_module_path,
    BuildConstraint, PackageDir, PackageUnits,
};
use crate::features::parsing::ports::DeclarationParser;
use crate::shared::models::{ConfdocError, Result};

/// Load every package under a root into a `DeclUniverse`
pub struct LoadUniverseUseCase<'c, P: DeclarationParser> {
    parser: P,
    config: &'c LoaderConfig,
}

impl<'c, P: DeclarationParser> LoadUniverseUseCase<'c, P> {
    pub fn new(parser: P, config: &'c LoaderConfig) -> Self {
        Self { parser, config }
    }

    /// Execute the load
    ///
    /// Any unreadable or unparsable file fails the whole load.
    pub fn execute(&self, root: &Path) -> Result<DeclUniverse> {
        if !root.is_dir() {
            return Err(ConfdocError::load("Root is not a readable directory")
                .with_file(root.display().to_string()));
        }

        let module = read_module_path(root)?;
        let dirs = discover_package_dirs(root, self.config, |ext| {
            self.parser.supports_extension(ext)
        })?;

        let mut packages = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            if let Some(units) = self.load_package(root, module.as_deref(), dir)? {
                packages.push(units);
            }
        }

        let universe = link(packages);
        info!(
            "Loaded {} types from {} packages under {}",
            universe.len(),
            universe.packages().len(),
            root.display()
        );
        Ok(universe)
    }

    fn load_package(
        &self,
        root: &Path,
        module: Option<&str>,
        dir: &PackageDir,
    ) -> Result<Option<PackageUnits>> {
        let mut units: Vec<SourceUnit> = Vec::with_capacity(dir.files.len());

        for path in &dir.files {
            let rel_path = relative_path(root, path);
            let source = std::fs::read_to_string(path).map_err(|e| {
                ConfdocError::load(format!("Failed to read source: {}", e))
                    .with_file(rel_path.clone())
                    .with_source(e)
            })?;

            if !self.satisfies_constraint(&source, &rel_path)? {
                debug!("Excluded by build constraint: {}", rel_path);
                continue;
            }

            units.push(self.parser.parse_unit(&source, &rel_path)?);
        }

        let Some(name) = units.first().map(|u| u.package_name.clone()) else {
            return Ok(None);
        };

        // External test packages (`foo_test`) share the directory but not the package
        units.retain(|u| {
            let keep = u.package_name == name || !u.package_name.ends_with("_test");
            if !keep {
                debug!("Skipping external test file {}", u.file_path);
            }
            keep
        });

        let id = package_id(module, &dir.rel_dir, &name);
        debug!("Package {} ({} files)", id, units.len());

        Ok(Some(PackageUnits {
            id,
            name,
            dir: dir.dir.clone(),
            units,
        }))
    }

    fn satisfies_constraint(&self, source: &str, file: &str) -> Result<bool> {
        let Some(expr) = find_go_build_line(source) else {
            return Ok(true);
        };
        let constraint = BuildConstraint::parse(expr).map_err(|e| {
            ConfdocError::load(format!("Invalid build constraint: {}", e))
                .with_file(file)
                .with_source(e)
        })?;
        Ok(constraint.eval(&|tag: &str| self.config.is_tag_set(tag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::GoDeclarationParser;
    use crate::shared::models::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    // Mock parser for testing
    struct MockParser;

    impl DeclarationParser for MockParser {
        fn parse_unit(&self, _source: &str, file_path: &str) -> Result<SourceUnit> {
            let mut unit = SourceUnit::new(file_path);
            unit.package_name = "mock".to_string();
            Ok(unit)
        }

        fn supports_extension(&self, ext: &str) -> bool {
            ext == "go"
        }

        fn language_name(&self) -> &'static str {
            "mock"
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_root_is_load_error() {
        let config = LoaderConfig::default();
        let use_case = LoadUniverseUseCase::new(MockParser, &config);
        let err = use_case.execute(Path::new("/nonexistent/confdoc")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Load);
    }

    #[test]
    fn test_mock_parser_packages() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/a.go", "");
        write(dir.path(), "b/b.go", "");

        let config = LoaderConfig::default();
        let universe = LoadUniverseUseCase::new(MockParser, &config)
            .execute(dir.path())
            .unwrap();

        let ids: Vec<_> = universe.packages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(universe.is_empty());
    }

    #[test]
    fn test_build_constraints_and_module_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/app\n");
        write(
            dir.path(),
            "engine/conf.go",
            "package engine\n\ntype Conf struct{}\n",
        );
        write(
            dir.path(),
            "engine/conf_windows.go",
            "//go:build windows\n\npackage engine\n\ntype WindowsConf struct{}\n",
        );

        let config = LoaderConfig::default();
        let universe = LoadUniverseUseCase::new(GoDeclarationParser::new(), &config)
            .execute(dir.path())
            .unwrap();

        assert!(universe.get_by_fqn("example.com/app/engine.Conf").is_some());
        assert!(universe.get_by_fqn("example.com/app/engine.WindowsConf").is_none());
    }

    #[test]
    fn test_malformed_constraint_fails_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "engine/conf.go", "//go:build linux &&\n\npackage engine\n");

        let config = LoaderConfig::default();
        let err = LoadUniverseUseCase::new(GoDeclarationParser::new(), &config)
            .execute(dir.path())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Load);
    }

    #[test]
    fn test_syntax_error_fails_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken/conf.go", "package broken\n\ntype Conf struct {\n");

        let config = LoaderConfig::default();
        let err = LoadUniverseUseCase::new(GoDeclarationParser::new(), &config)
            .execute(dir.path())
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Load);
        assert_eq!(err.file_path.as_deref(), Some("broken/conf.go"));
    }
}
