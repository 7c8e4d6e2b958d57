//! Capability and match models

use serde::Serialize;

use crate::features::parsing::domain::{MethodSig, TypeId};

/// Resolved capability interface
#[derive(Debug, Clone, PartialEq)]
pub struct Capability {
    pub id: TypeId,
    /// Required method set, embedded interfaces included
    pub methods: Vec<MethodSig>,
}

impl Capability {
    /// The method reporting a type's lookup key: the first required method
    /// taking nothing and returning a single `string`.
    pub fn key_method(&self) -> Option<&MethodSig> {
        self.methods
            .iter()
            .find(|m| m.params.is_empty() && m.results.len() == 1 && m.results[0] == "string")
    }

    /// Whether a method set covers every required method
    pub fn is_satisfied_by(&self, mut contains: impl FnMut(&MethodSig) -> bool) -> bool {
        self.methods.iter().all(|m| contains(m))
    }
}

/// A type confirmed to implement the capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractMatch {
    pub id: TypeId,
    /// Statically evaluated key; `None` when it is not a compile-time constant
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_method() {
        let capability = Capability {
            id: TypeId::new("app/config", "Section"),
            methods: vec![
                MethodSig::new("Validate", vec![], vec!["error".to_string()]),
                MethodSig::new("Key", vec![], vec!["string".to_string()]),
            ],
        };
        assert_eq!(capability.key_method().map(|m| m.name.as_str()), Some("Key"));
        assert!(capability.is_satisfied_by(|_| true));
        assert!(!capability.is_satisfied_by(|m| m.name == "Key"));
    }
}
