//! Resolve fields use case
//!
//! Expands a matched type into its `FieldNode` tree, depth-first and in
//! declaration order. Embedded structs are spliced in place. Recursion stops
//! at any type already on the active path.

use tracing::{debug, warn};

use crate::config::TagConfig;
use crate::features::contract_matching::ContractMatch;
use crate::features::field_resolution::domain::{FieldNode, MatchedType};
use crate::features::field_resolution::infrastructure::{ActivePath, Resolved, ShapeUnwrapper};
use crate::features::parsing::domain::{DeclUniverse, FieldDecl, Shape, TypeId};
use crate::features::tag_parsing::TagParser;
use crate::shared::models::{ConfdocError, Result};

pub struct ResolveFieldsUseCase<'u, 'c> {
    universe: &'u DeclUniverse,
    unwrapper: ShapeUnwrapper<'u>,
    tags: TagParser<'c>,
}

impl<'u, 'c> ResolveFieldsUseCase<'u, 'c> {
    pub fn new(universe: &'u DeclUniverse, tags: &'c TagConfig) -> Self {
        Self {
            universe,
            unwrapper: ShapeUnwrapper::new(universe),
            tags: TagParser::new(tags),
        }
    }

    /// Resolve one matched type
    ///
    /// Fails with a `Resolution` error when an embedded field is not a struct.
    pub fn execute(&self, matched: &ContractMatch) -> Result<MatchedType> {
        let decl = self.universe.get(&matched.id).ok_or_else(|| {
            ConfdocError::internal(format!("Matched type {} is not in the universe", matched.id))
        })?;

        let mut path = ActivePath::new();
        path.push(&decl.id);

        let unwrapped = self.unwrapper.unwrap(&decl.shape, &mut path);
        let fields = match unwrapped.resolved {
            Resolved::Struct(fields) => {
                let owner = unwrapped.owner.unwrap_or(&decl.id);
                self.build(fields, owner, &mut path)
                    .map_err(|e| e.with_file(decl.file_path.clone()))?
            }
            _ => {
                debug!("{} is not a struct; documenting no fields", decl.id);
                Vec::new()
            }
        };

        Ok(MatchedType {
            id: decl.id.clone(),
            key: matched.key.clone(),
            description: decl.description.clone(),
            fields,
        })
    }

    fn build(
        &self,
        fields: &'u [FieldDecl],
        owner: &'u TypeId,
        path: &mut ActivePath,
    ) -> Result<Vec<FieldNode>> {
        let mut nodes = Vec::with_capacity(fields.len());

        for field in fields {
            let Some(name) = &field.name else {
                nodes.extend(self.splice(field, owner, path)?);
                continue;
            };

            let (tag, tag_error) = match self.tags.parse(field.tag.as_deref()) {
                Ok(Some(tag)) => (Some(tag), None),
                Ok(None) => {
                    debug!("Ignoring {}.{}", owner, name);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping field {}.{}: {}", owner, name, e);
                    (None, Some(e))
                }
            };

            let unwrapped = self.unwrapper.unwrap(&field.shape, path);
            let mut children = None;
            let mut recursive = false;
            match unwrapped.resolved {
                Resolved::Struct(inner) if tag_error.is_none() => {
                    let inner_owner = unwrapped.owner.unwrap_or(owner);
                    children = Some(self.build(inner, inner_owner, path)?);
                }
                Resolved::Recursive(id) => {
                    debug!("{}.{} refers back to {}", owner, name, id);
                    recursive = true;
                }
                _ => {}
            }
            path.pop_n(unwrapped.entered);

            nodes.push(FieldNode {
                name: tag.as_ref().map(|t| t.name.clone()).unwrap_or_else(|| name.clone()),
                field: name.clone(),
                doc: field.doc.clone(),
                tag,
                tag_error,
                children,
                repeated: unwrapped.repeated,
                recursive,
            });
        }

        Ok(nodes)
    }

    /// Fields promoted from an embedded field
    fn splice(
        &self,
        field: &'u FieldDecl,
        owner: &'u TypeId,
        path: &mut ActivePath,
    ) -> Result<Vec<FieldNode>> {
        let unwrapped = self.unwrapper.unwrap(&field.shape, path);
        let nodes = match unwrapped.resolved {
            Resolved::Struct(inner) => {
                self.build(inner, unwrapped.owner.unwrap_or(owner), path)?
            }
            Resolved::Recursive(id) => {
                warn!("Embedded {} in {} re-enters its own type; skipped", id, owner);
                Vec::new()
            }
            Resolved::Leaf => {
                return Err(ConfdocError::resolution(format!(
                    "Embedded field {} of {} does not resolve to a struct",
                    shape_label(&field.shape),
                    owner
                ))
                .with_line(field.span.start_line));
            }
        };
        path.pop_n(unwrapped.entered);
        Ok(nodes)
    }
}

fn shape_label(shape: &Shape) -> String {
    match shape {
        Shape::Named(id) => id.to_string(),
        Shape::Pointer(inner) => format!("*{}", shape_label(inner)),
        Shape::Sequence(inner) => format!("[]{}", shape_label(inner)),
        Shape::Opaque(text) => text.clone(),
        Shape::Struct(_) => "struct{...}".to_string(),
        Shape::Interface(_) => "interface{...}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::testing::universe;
    use crate::features::tag_parsing::{ParsedTag, TagError};
    use crate::shared::models::ErrorKind;

    fn resolve(source: &str, type_name: &str) -> Result<MatchedType> {
        let universe = universe(&[("engine/conf.go", source)]);
        let config = TagConfig::default();
        let matched = ContractMatch {
            id: TypeId::new("example.com/app/engine", type_name),
            key: Some("engine".to_string()),
        };
        ResolveFieldsUseCase::new(&universe, &config).execute(&matched)
    }

    fn names(nodes: &[FieldNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_leaf_with_tag() {
        let matched = resolve(
            r#"package engine

type Conf struct {
	// Count of workers.
	Count int `yaml:"count" conf:"required,example=4"`
}
"#,
            "Conf",
        )
        .unwrap();

        assert_eq!(matched.key.as_deref(), Some("engine"));
        let count = &matched.fields[0];
        assert_eq!(count.name, "count");
        assert_eq!(count.field, "Count");
        assert_eq!(count.doc, "Count of workers.");
        assert_eq!(count.tag, Some(ParsedTag::new("count").required().with_example("4")));
        assert!(!count.has_children());
    }

    #[test]
    fn test_sequence_of_struct_is_repeated_with_children() {
        let matched = resolve(
            r#"package engine

type Inner struct {
	Name string `yaml:"name"`
	Port int    `yaml:"port"`
}

type Outer struct {
	Inner []Inner `yaml:"inner"`
}
"#,
            "Outer",
        )
        .unwrap();

        let inner = &matched.fields[0];
        assert!(inner.repeated);
        assert_eq!(names(inner.children.as_ref().unwrap()), vec!["name", "port"]);
    }

    #[test]
    fn test_embedded_struct_is_spliced() {
        let matched = resolve(
            r#"package engine

type Common struct {
	Timeout string `yaml:"timeout"`
}

type Conf struct {
	First string `yaml:"first"`
	*Common
	Last string `yaml:"last"`
}
"#,
            "Conf",
        )
        .unwrap();

        assert_eq!(names(&matched.fields), vec!["first", "timeout", "last"]);
    }

    #[test]
    fn test_embedded_non_struct_is_resolution_error() {
        let err = resolve(
            r#"package engine

type Name string

type Conf struct {
	Name
}
"#,
            "Conf",
        )
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Resolution);
        assert!(err.message.contains("example.com/app/engine.Name"));
        assert!(!err.is_fatal());
        assert_eq!(err.file_path.as_deref(), Some("engine/conf.go"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let matched = resolve(
            r#"package engine

type Node struct {
	Value    string  `yaml:"value"`
	Children []*Node `yaml:"children"`
	Parent   *Node   `yaml:"parent"`
}
"#,
            "Node",
        )
        .unwrap();

        let children = &matched.fields[1];
        assert!(children.recursive);
        assert!(children.repeated);
        assert!(children.children.is_none());
        assert!(matched.fields[2].recursive);
    }

    #[test]
    fn test_mutual_recursion_expands_once() {
        let matched = resolve(
            r#"package engine

type A struct {
	B *B `yaml:"b"`
}

type B struct {
	A *A `yaml:"a"`
}
"#,
            "A",
        )
        .unwrap();

        let b = &matched.fields[0];
        let a = &b.children.as_ref().unwrap()[0];
        assert_eq!(a.name, "a");
        assert!(a.recursive);
    }

    #[test]
    fn test_siblings_may_share_a_type() {
        let matched = resolve(
            r#"package engine

type Creds struct {
	User string `yaml:"user"`
}

type Conf struct {
	Primary   Creds `yaml:"primary"`
	Secondary Creds `yaml:"secondary"`
}
"#,
            "Conf",
        )
        .unwrap();

        for node in &matched.fields {
            assert!(!node.recursive);
            assert_eq!(names(node.children.as_ref().unwrap()), vec!["user"]);
        }
    }

    #[test]
    fn test_tag_errors_are_kept_and_ignored_fields_dropped() {
        let matched = resolve(
            r#"package engine

type Inner struct {
	X int `yaml:"x"`
}

type Conf struct {
	NoTag   int
	Skipped int `yaml:"-"`
	Broken  Inner `yaml:broken`
	Fine    int `yaml:"fine"`
}
"#,
            "Conf",
        )
        .unwrap();

        assert_eq!(names(&matched.fields), vec!["NoTag", "Broken", "fine"]);
        assert!(matches!(
            matched.fields[0].tag_error,
            Some(TagError::Missing { .. })
        ));
        assert!(matches!(
            matched.fields[1].tag_error,
            Some(TagError::Malformed { .. })
        ));
        assert!(matched.fields[1].children.is_none());
        assert_eq!(matched.tag_error_count(), 2);
    }

    #[test]
    fn test_inline_struct_and_multi_name_fields() {
        let matched = resolve(
            r#"package engine

type Conf struct {
	Limits struct {
		Min, Max int `yaml:"bound"`
	} `yaml:"limits"`
}
"#,
            "Conf",
        )
        .unwrap();

        let limits = &matched.fields[0];
        let children = limits.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].field, "Min");
        assert_eq!(children[1].field, "Max");
    }
}
