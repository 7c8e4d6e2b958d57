//! Wrapper peeling
//!
//! Pointers, sequences and named references are peeled outermost-first in a
//! single loop, whatever order they are nested in. A sequence anywhere on the
//! way sets the repetition flag once.

use crate::features::parsing::domain::{DeclUniverse, FieldDecl, Shape, TypeId};

use super::active_path::ActivePath;

/// What a shape resolves to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'u> {
    Struct(&'u [FieldDecl]),
    /// Builtins, maps, interfaces, types outside the universe
    Leaf,
    /// A named type already on the active path
    Recursive(&'u TypeId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unwrapped<'u> {
    pub resolved: Resolved<'u>,
    pub repeated: bool,
    /// Last named type entered; declares the struct's fields
    pub owner: Option<&'u TypeId>,
    /// Types pushed onto the active path; the caller pops them when done
    pub entered: usize,
}

pub struct ShapeUnwrapper<'u> {
    universe: &'u DeclUniverse,
}

impl<'u> ShapeUnwrapper<'u> {
    pub fn new(universe: &'u DeclUniverse) -> Self {
        Self { universe }
    }

    pub fn unwrap(&self, shape: &'u Shape, path: &mut ActivePath) -> Unwrapped<'u> {
        let mut current = shape;
        let mut out = Unwrapped {
            resolved: Resolved::Leaf,
            repeated: false,
            owner: None,
            entered: 0,
        };

        loop {
            match current {
                Shape::Pointer(inner) => current = inner,
                Shape::Sequence(inner) => {
                    out.repeated = true;
                    current = inner;
                }
                Shape::Named(id) => {
                    if path.contains(id) {
                        out.resolved = Resolved::Recursive(id);
                        return out;
                    }
                    let Some(decl) = self.universe.get(id) else {
                        return out;
                    };
                    path.push(id);
                    out.entered += 1;
                    out.owner = Some(&decl.id);
                    current = &decl.shape;
                }
                Shape::Struct(fields) => {
                    out.resolved = Resolved::Struct(fields);
                    return out;
                }
                Shape::Interface(_) | Shape::Opaque(_) => return out,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::testing::universe;

    fn field_shape<'u>(universe: &'u DeclUniverse, fqn: &str, index: usize) -> &'u Shape {
        match &universe.get_by_fqn(fqn).unwrap().shape {
            Shape::Struct(fields) => &fields[index].shape,
            other => panic!("not a struct: {:?}", other),
        }
    }

    #[test]
    fn test_nested_wrappers_resolve_alike() {
        let universe = universe(&[(
            "engine/conf.go",
            r#"package engine

type Inner struct {
	A int
}

type Conf struct {
	P  **Inner
	SP []*Inner
	PS *[]Inner
	SS [][]Inner
	M  map[string]Inner
}
"#,
        )]);
        let unwrapper = ShapeUnwrapper::new(&universe);
        let inner = TypeId::new("example.com/app/engine", "Inner");

        for (index, repeated) in [(0, false), (1, true), (2, true), (3, true)] {
            let mut path = ActivePath::new();
            let out = unwrapper.unwrap(field_shape(&universe, "example.com/app/engine.Conf", index), &mut path);
            assert!(matches!(out.resolved, Resolved::Struct(fields) if fields.len() == 1));
            assert_eq!(out.repeated, repeated, "field {}", index);
            assert_eq!(out.owner, Some(&inner));
            assert_eq!(out.entered, 1);
            assert!(path.contains(&inner));
        }

        let mut path = ActivePath::new();
        let out = unwrapper.unwrap(field_shape(&universe, "example.com/app/engine.Conf", 4), &mut path);
        assert_eq!(out.resolved, Resolved::Leaf);
        assert_eq!(out.entered, 0);
    }

    #[test]
    fn test_reentry_is_recursive() {
        let universe = universe(&[(
            "tree/node.go",
            "package tree\n\ntype Node struct {\n\tChildren []*Node\n}\n",
        )]);
        let unwrapper = ShapeUnwrapper::new(&universe);
        let node = TypeId::new("example.com/app/tree", "Node");

        let mut path = ActivePath::new();
        path.push(&node);
        let out = unwrapper.unwrap(field_shape(&universe, "example.com/app/tree.Node", 0), &mut path);
        assert_eq!(out.resolved, Resolved::Recursive(&node));
        assert!(out.repeated);
        assert_eq!(out.entered, 0);
    }
}
