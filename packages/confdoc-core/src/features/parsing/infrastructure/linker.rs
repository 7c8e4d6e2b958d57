//! Declaration linker
//!
//! Turns per-file `SourceUnit`s into the `DeclUniverse`: bare identifiers are
//! resolved against their own package, qualifiers through the file's imports.
//! Whatever does not resolve to a loaded declaration becomes `Shape::Opaque`.

use rustc_hash::{FxHashMap, FxHashSet};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::features::parsing::domain::{
    ConstExpr, DeclUniverse, FieldDecl, Import, InterfaceShape, MethodDecl, Package, RawField,
    Shape, SourceUnit, TypeDecl, TypeExpr, TypeId,
};

/// Parsed files of one package, ready to be linked
#[derive(Debug, Clone)]
pub struct PackageUnits {
    pub id: String,
    pub name: String,
    pub dir: PathBuf,
    pub units: Vec<SourceUnit>,
}

/// Names known across the whole load, used for resolution
struct NameIndex {
    /// package id -> declared type names
    types: FxHashMap<String, FxHashSet<String>>,
    /// package id -> package clause name
    package_names: FxHashMap<String, String>,
}

/// Resolution scope of one file
struct FileScope<'a> {
    package: &'a str,
    imports: &'a [Import],
    index: &'a NameIndex,
}

impl FileScope<'_> {
    /// Import path a qualifier refers to
    fn import_path(&self, qualifier: &str) -> Option<&str> {
        if let Some(import) = self
            .imports
            .iter()
            .find(|i| i.alias.as_deref() == Some(qualifier))
        {
            return Some(import.path.as_str());
        }

        self.imports
            .iter()
            .filter(|i| i.alias.is_none())
            .find(|i| match self.index.package_names.get(&i.path) {
                Some(name) => name == qualifier,
                None => default_package_name(&i.path) == qualifier,
            })
            .map(|i| i.path.as_str())
    }

    fn declares(&self, package: &str, name: &str) -> bool {
        self.index
            .types
            .get(package)
            .map(|names| names.contains(name))
            .unwrap_or(false)
    }

    fn shape(&self, ty: &TypeExpr) -> Shape {
        match ty {
            TypeExpr::Ident(name) => {
                if self.declares(self.package, name) {
                    Shape::Named(TypeId::new(self.package, name.as_str()))
                } else {
                    Shape::Opaque(name.clone())
                }
            }
            TypeExpr::Qualified { qualifier, name } => match self.import_path(qualifier) {
                Some(path) if self.declares(path, name) => Shape::Named(TypeId::new(path, name.as_str())),
                _ => Shape::Opaque(format!("{}.{}", qualifier, name)),
            },
            TypeExpr::Pointer(inner) => Shape::Pointer(Box::new(self.shape(inner))),
            TypeExpr::Sequence(inner) => Shape::Sequence(Box::new(self.shape(inner))),
            TypeExpr::Struct(fields) => {
                Shape::Struct(fields.iter().flat_map(|f| self.fields(f)).collect())
            }
            TypeExpr::Interface { methods, embedded } => Shape::Interface(InterfaceShape {
                methods: methods.clone(),
                embedded: embedded.iter().map(|e| self.shape(e)).collect(),
            }),
            TypeExpr::Opaque(text) => Shape::Opaque(text.clone()),
        }
    }

    /// One `FieldDecl` per declared name; embedded fields keep `name: None`.
    fn fields(&self, raw: &RawField) -> Vec<FieldDecl> {
        let shape = self.shape(&raw.ty);
        if raw.names.is_empty() {
            return vec![FieldDecl {
                name: None,
                doc: raw.doc.clone(),
                tag: raw.tag.clone(),
                shape,
                span: raw.span,
            }];
        }

        raw.names
            .iter()
            .map(|name| FieldDecl {
                name: Some(name.clone()),
                doc: raw.doc.clone(),
                tag: raw.tag.clone(),
                shape: shape.clone(),
                span: raw.span,
            })
            .collect()
    }

    fn const_expr(&self, expr: &ConstExpr) -> ConstExpr {
        match expr {
            ConstExpr::Qualified { package, name } => match self.import_path(package) {
                Some(path) => ConstExpr::Qualified {
                    package: path.to_string(),
                    name: name.clone(),
                },
                None => ConstExpr::Unknown(format!("{}.{}", package, name)),
            },
            ConstExpr::Concat(left, right) => ConstExpr::Concat(
                Box::new(self.const_expr(left)),
                Box::new(self.const_expr(right)),
            ),
            other => other.clone(),
        }
    }
}

/// Package name implied by an import path: last element, minus a major version
/// suffix (`/v2`) or a gopkg.in style `.v3`.
pub fn default_package_name(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        last = segments.next().unwrap_or(last);
    }
    match last.rsplit_once(".v") {
        Some((base, version)) if version.chars().all(|c| c.is_ascii_digit()) => base,
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].chars().all(|c| c.is_ascii_digit())
}

fn is_exported(name: &str) -> bool {
    name.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

/// Link all packages into an immutable universe
pub fn link(packages: Vec<PackageUnits>) -> DeclUniverse {
    let index = build_index(&packages);

    let mut decls: FxHashMap<TypeId, TypeDecl> = FxHashMap::default();
    let mut linked_packages = Vec::with_capacity(packages.len());

    for pkg in &packages {
        let mut order = Vec::new();
        let mut consts = FxHashMap::default();

        for unit in &pkg.units {
            let scope = FileScope {
                package: &pkg.id,
                imports: &unit.imports,
                index: &index,
            };

            for raw in &unit.types {
                let id = TypeId::new(pkg.id.as_str(), raw.name.as_str());
                if decls.contains_key(&id) {
                    warn!("Duplicate declaration of {} in {}, keeping the first", id, unit.file_path);
                    continue;
                }
                order.push(id.clone());
                decls.insert(
                    id.clone(),
                    TypeDecl {
                        exported: is_exported(&raw.name),
                        id,
                        doc: raw.doc.clone(),
                        description: raw.description.clone(),
                        shape: scope.shape(&raw.ty),
                        is_alias: raw.is_alias,
                        methods: Vec::new(),
                        file_path: unit.file_path.clone(),
                        span: raw.span,
                    },
                );
            }

            for (name, expr) in &unit.consts {
                consts.insert(name.clone(), scope.const_expr(expr));
            }
        }

        linked_packages.push(Package {
            id: pkg.id.clone(),
            name: pkg.name.clone(),
            dir: pkg.dir.clone(),
            files: pkg.units.iter().map(|u| u.file_path.clone()).collect(),
            types: order,
            consts,
        });
    }

    // Methods may be declared in a different file than their receiver type
    for pkg in &packages {
        for unit in &pkg.units {
            let scope = FileScope {
                package: &pkg.id,
                imports: &unit.imports,
                index: &index,
            };
            for method in &unit.methods {
                let id = TypeId::new(pkg.id.as_str(), method.receiver.as_str());
                match decls.get_mut(&id) {
                    Some(decl) => decl.methods.push(MethodDecl {
                        signature: method.signature.clone(),
                        receiver: method.receiver_kind,
                        returned: method.returned.as_ref().map(|e| scope.const_expr(e)),
                        span: method.span,
                    }),
                    None => debug!(
                        "Method {} has receiver {} not declared in {}",
                        method.signature.name, method.receiver, pkg.id
                    ),
                }
            }
        }
    }

    DeclUniverse::new(linked_packages, decls.into_values().collect())
}

fn build_index(packages: &[PackageUnits]) -> NameIndex {
    let mut types: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
    let mut package_names = FxHashMap::default();

    for pkg in packages {
        let names = types.entry(pkg.id.clone()).or_default();
        for unit in &pkg.units {
            if unit.package_name != pkg.name {
                warn!(
                    "{} declares package {} but its directory holds package {}",
                    unit.file_path, unit.package_name, pkg.name
                );
            }
            names.extend(unit.types.iter().map(|t| t.name.clone()));
        }
        package_names.insert(pkg.id.clone(), pkg.name.clone());
    }

    NameIndex {
        types,
        package_names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::GoDeclarationParser;
    use crate::features::parsing::ports::DeclarationParser;

    fn package(id: &str, files: &[(&str, &str)]) -> PackageUnits {
        let parser = GoDeclarationParser::new();
        let units: Vec<SourceUnit> = files
            .iter()
            .map(|(path, source)| parser.parse_unit(source, path).unwrap())
            .collect();
        PackageUnits {
            id: id.to_string(),
            name: units[0].package_name.clone(),
            dir: PathBuf::from(id),
            units,
        }
    }

    #[test]
    fn test_default_package_name() {
        assert_eq!(default_package_name("example.com/app/internal/server"), "server");
        assert_eq!(default_package_name("github.com/org/lib/v2"), "lib");
        assert_eq!(default_package_name("gopkg.in/yaml.v3"), "yaml");
        assert_eq!(default_package_name("fmt"), "fmt");
    }

    #[test]
    fn test_link_resolves_local_and_cross_package_names() {
        let server = package(
            "example.com/app/server",
            &[(
                "server/conf.go",
                r#"
package server

const ConfKey = "server"

type Conf struct {
	Credentials *CredsConf `yaml:"credentials"`
	Port int `yaml:"port"`
}

type CredsConf struct {
	Username string `yaml:"username"`
}
"#,
            )],
        );
        let http = package(
            "example.com/app/server/http",
            &[(
                "server/http/conf.go",
                r#"
package http

import "example.com/app/server"

const confKey = server.ConfKey + ".http"

type Conf struct {
	Parent server.Conf `yaml:"parent"`
	Other fmt.Stringer `yaml:"other"`
}

func (c *Conf) Key() string {
	return confKey
}
"#,
            )],
        );

        let universe = link(vec![server, http]);
        assert_eq!(universe.len(), 3);

        let conf = universe.get_by_fqn("example.com/app/server.Conf").unwrap();
        let Shape::Struct(fields) = &conf.shape else {
            panic!("expected struct");
        };
        assert_eq!(
            fields[0].shape,
            Shape::Pointer(Box::new(Shape::Named(TypeId::new(
                "example.com/app/server",
                "CredsConf"
            ))))
        );
        assert_eq!(fields[1].shape, Shape::Opaque("int".to_string()));

        let http_conf = universe.get_by_fqn("example.com/app/server/http.Conf").unwrap();
        let Shape::Struct(fields) = &http_conf.shape else {
            panic!("expected struct");
        };
        assert_eq!(
            fields[0].shape,
            Shape::Named(TypeId::new("example.com/app/server", "Conf"))
        );
        assert_eq!(fields[1].shape, Shape::Opaque("fmt.Stringer".to_string()));

        assert_eq!(http_conf.methods.len(), 1);
        assert_eq!(
            universe.constant("example.com/app/server/http", "confKey"),
            Some(&ConstExpr::Concat(
                Box::new(ConstExpr::Qualified {
                    package: "example.com/app/server".to_string(),
                    name: "ConfKey".to_string()
                }),
                Box::new(ConstExpr::Literal(".http".to_string()))
            ))
        );
    }

    #[test]
    fn test_methods_attach_across_files() {
        let pkg = package(
            "app/engine",
            &[
                ("engine/conf.go", "package engine\n\ntype Conf struct{}\n"),
                (
                    "engine/key.go",
                    "package engine\n\nfunc (c Conf) Key() string { return \"engine\" }\n",
                ),
            ],
        );

        let universe = link(vec![pkg]);
        let conf = universe.get_by_fqn("app/engine.Conf").unwrap();
        assert!(conf.method("Key").is_some());
        assert!(conf.exported);
    }
}
