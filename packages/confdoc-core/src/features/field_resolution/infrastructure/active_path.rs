//! Types currently being resolved
//!
//! Membership is by `TypeId`, never by structural equality.

use rustc_hash::FxHashSet;

use crate::features::parsing::domain::TypeId;

#[derive(Debug, Default)]
pub struct ActivePath {
    members: FxHashSet<TypeId>,
    stack: Vec<TypeId>,
}

impl ActivePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.members.contains(id)
    }

    /// Enter `id`; returns false (and does nothing) when it is already active.
    pub fn push(&mut self, id: &TypeId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.stack.push(id.clone());
        true
    }

    /// Leave the `n` most recently entered types
    pub fn pop_n(&mut self, n: usize) {
        for _ in 0..n {
            if let Some(id) = self.stack.pop() {
                self.members.remove(&id);
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let a = TypeId::new("app", "A");
        let b = TypeId::new("app", "B");
        let mut path = ActivePath::new();

        assert!(path.push(&a));
        assert!(path.push(&b));
        assert!(!path.push(&a));
        assert_eq!(path.depth(), 2);

        path.pop_n(1);
        assert!(!path.contains(&b));
        assert!(path.contains(&a));
        path.pop_n(5);
        assert_eq!(path.depth(), 0);
    }
}
