//! Method sets
//!
//! A type's method set here is the union of its value and pointer receiver
//! methods plus everything promoted through embedded fields. Interface method
//! sets include embedded interfaces. Both walks keep a visited set so cyclic
//! embeddings terminate.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::features::parsing::domain::{
    DeclUniverse, InterfaceShape, MethodSig, Shape, TypeDecl, TypeId,
};

pub struct MethodSetBuilder<'u> {
    universe: &'u DeclUniverse,
}

impl<'u> MethodSetBuilder<'u> {
    pub fn new(universe: &'u DeclUniverse) -> Self {
        Self { universe }
    }

    /// Methods callable on `T` or `*T`
    pub fn type_methods(&self, decl: &TypeDecl) -> FxHashSet<MethodSig> {
        let mut methods: FxHashSet<MethodSig> =
            decl.methods.iter().map(|m| m.signature.clone()).collect();
        let mut visited = FxHashSet::default();
        visited.insert(decl.id.clone());
        self.promote(&decl.shape, &mut methods, &mut visited);
        methods
    }

    /// Required methods of an interface, in declaration order
    pub fn interface_methods(&self, decl: &TypeDecl) -> Vec<MethodSig> {
        let mut methods = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(decl.id.clone());
        if let Shape::Interface(shape) = &decl.shape {
            self.collect_interface(shape, &mut methods, &mut visited);
        }
        methods
    }

    fn promote(
        &self,
        shape: &Shape,
        methods: &mut FxHashSet<MethodSig>,
        visited: &mut FxHashSet<TypeId>,
    ) {
        match shape {
            Shape::Struct(fields) => {
                for field in fields.iter().filter(|f| f.is_embedded()) {
                    let Some(id) = field.shape.named_target() else {
                        continue;
                    };
                    let Some(embedded) = self.enter(id, visited) else {
                        continue;
                    };
                    match &embedded.shape {
                        Shape::Interface(shape) => {
                            let mut promoted = Vec::new();
                            self.collect_interface(shape, &mut promoted, visited);
                            methods.extend(promoted);
                        }
                        other => {
                            methods.extend(embedded.methods.iter().map(|m| m.signature.clone()));
                            self.promote(other, methods, visited);
                        }
                    }
                }
            }
            // A defined type keeps the fields of its underlying struct, not its methods
            Shape::Named(id) => {
                if let Some(underlying) = self.enter(id, visited) {
                    self.promote(&underlying.shape, methods, visited);
                }
            }
            _ => {}
        }
    }

    fn collect_interface(
        &self,
        shape: &InterfaceShape,
        methods: &mut Vec<MethodSig>,
        visited: &mut FxHashSet<TypeId>,
    ) {
        for method in &shape.methods {
            if !methods.contains(method) {
                methods.push(method.clone());
            }
        }
        for embedded in &shape.embedded {
            match embedded {
                Shape::Named(id) => match self.enter(id, visited).map(|d| &d.shape) {
                    Some(Shape::Interface(inner)) => {
                        self.collect_interface(inner, methods, visited)
                    }
                    Some(_) => debug!("Embedded type {} is not an interface", id),
                    None => {}
                },
                other => debug!("Embedded interface {:?} is outside the universe", other),
            }
        }
    }

    /// Declaration of `id`, unless already visited
    fn enter(&self, id: &TypeId, visited: &mut FxHashSet<TypeId>) -> Option<&'u TypeDecl> {
        if !visited.insert(id.clone()) {
            return None;
        }
        self.universe.get(id)
    }
}
