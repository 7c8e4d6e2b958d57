//! Static evaluation of key expressions
//!
//! Covers string literals, constants of loaded packages and `+`. Anything
//! else, including a constant that refers back to itself, has no value.

use rustc_hash::FxHashSet;

use crate::features::parsing::domain::{ConstExpr, DeclUniverse};

pub struct KeyEvaluator<'u> {
    universe: &'u DeclUniverse,
}

impl<'u> KeyEvaluator<'u> {
    pub fn new(universe: &'u DeclUniverse) -> Self {
        Self { universe }
    }

    /// Evaluate `expr` as written in `package`
    pub fn evaluate(&self, package: &str, expr: &ConstExpr) -> Option<String> {
        let mut active = FxHashSet::default();
        self.eval(package, expr, &mut active)
    }

    fn eval(
        &self,
        package: &str,
        expr: &ConstExpr,
        active: &mut FxHashSet<(String, String)>,
    ) -> Option<String> {
        match expr {
            ConstExpr::Literal(value) => Some(value.clone()),
            ConstExpr::Local(name) => self.constant(package, name, active),
            ConstExpr::Qualified { package, name } => self.constant(package, name, active),
            ConstExpr::Concat(left, right) => {
                let mut value = self.eval(package, left, active)?;
                value.push_str(&self.eval(package, right, active)?);
                Some(value)
            }
            ConstExpr::Unknown(_) => None,
        }
    }

    fn constant(
        &self,
        package: &str,
        name: &str,
        active: &mut FxHashSet<(String, String)>,
    ) -> Option<String> {
        let slot = (package.to_string(), name.to_string());
        if !active.insert(slot.clone()) {
            return None;
        }
        let value = self
            .universe
            .constant(package, name)
            .and_then(|expr| self.eval(package, expr, active));
        active.remove(&slot);
        value
    }
}
