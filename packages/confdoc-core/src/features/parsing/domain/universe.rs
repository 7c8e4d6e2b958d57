//! Declaration universe
//!
//! Immutable snapshot of every type declaration loaded in one run. Built once
//! by the linker; every later stage only reads it.

use rustc_hash::FxHashMap;
use std::path::PathBuf;

use super::declarations::{ConstExpr, TypeDecl, TypeId};

/// Version of the declaration IR layout
pub const UNIVERSE_VERSION: u32 = 1;

/// One Go package (all loaded files of one directory)
#[derive(Debug, Clone)]
pub struct Package {
    /// Import path
    pub id: String,
    /// Name from the package clause
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<String>,
    /// Declared types in source order
    pub types: Vec<TypeId>,
    pub consts: FxHashMap<String, ConstExpr>,
}

/// Declaration universe keyed by fully-qualified type name
#[derive(Debug, Clone, Default)]
pub struct DeclUniverse {
    packages: Vec<Package>,
    types: FxHashMap<TypeId, TypeDecl>,
    order: Vec<TypeId>,
}

impl DeclUniverse {
    /// Assemble a universe. `packages` order defines discovery order.
    pub fn new(packages: Vec<Package>, decls: Vec<TypeDecl>) -> Self {
        let mut types = FxHashMap::default();
        for decl in decls {
            types.insert(decl.id.clone(), decl);
        }

        let order = packages
            .iter()
            .flat_map(|p| p.types.iter().cloned())
            .filter(|id| types.contains_key(id))
            .collect();

        Self {
            packages,
            types,
            order,
        }
    }

    pub fn version(&self) -> u32 {
        UNIVERSE_VERSION
    }

    pub fn get(&self, id: &TypeId) -> Option<&TypeDecl> {
        self.types.get(id)
    }

    /// Lookup by `<import path>.<Type>`
    pub fn get_by_fqn(&self, fqn: &str) -> Option<&TypeDecl> {
        let (package, name) = fqn.rsplit_once('.')?;
        self.types.get(&TypeId::new(package, name))
    }

    /// All declarations in discovery order
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.order.iter().filter_map(move |id| self.types.get(id))
    }

    /// Declarations with the given type name, in discovery order
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TypeDecl> + 'a {
        self.types().filter(move |decl| decl.id.name == name)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn constant(&self, package: &str, name: &str) -> Option<&ConstExpr> {
        self.package(package).and_then(|p| p.consts.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::Shape;
    use crate::shared::models::Span;

    fn decl(package: &str, name: &str) -> TypeDecl {
        TypeDecl {
            id: TypeId::new(package, name),
            exported: true,
            doc: String::new(),
            description: None,
            shape: Shape::Struct(vec![]),
            is_alias: false,
            methods: vec![],
            file_path: "conf.go".to_string(),
            span: Span::zero(),
        }
    }

    fn package(id: &str, types: &[&str]) -> Package {
        Package {
            id: id.to_string(),
            name: id.rsplit('/').next().unwrap_or(id).to_string(),
            dir: PathBuf::from(id),
            files: vec![],
            types: types.iter().map(|t| TypeId::new(id, *t)).collect(),
            consts: FxHashMap::default(),
        }
    }

    #[test]
    fn test_discovery_order_follows_packages() {
        let universe = DeclUniverse::new(
            vec![package("app/b", &["Zed", "Alpha"]), package("app/a", &["Conf"])],
            vec![decl("app/a", "Conf"), decl("app/b", "Alpha"), decl("app/b", "Zed")],
        );

        let names: Vec<_> = universe.types().map(|d| d.id.fqn()).collect();
        assert_eq!(names, vec!["app/b.Zed", "app/b.Alpha", "app/a.Conf"]);
        assert_eq!(universe.len(), 3);
    }

    #[test]
    fn test_lookup_by_fqn() {
        let universe = DeclUniverse::new(
            vec![package("example.com/app/server", &["Conf"])],
            vec![decl("example.com/app/server", "Conf")],
        );

        assert!(universe.get_by_fqn("example.com/app/server.Conf").is_some());
        assert!(universe.get_by_fqn("example.com/app/server.Missing").is_none());
        assert_eq!(universe.find_by_name("Conf").count(), 1);
    }
}
