//! Normalized field tree

use crate::features::parsing::domain::TypeId;
use crate::features::tag_parsing::{ParsedTag, TagError};

/// One field after resolution
///
/// `children` is `Some` only when the field's shape resolves to a struct. A
/// field whose tag failed to parse keeps the error and no children.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    /// Display name: the tag name when available, the Go field name otherwise
    pub name: String,
    /// Go field name
    pub field: String,
    pub doc: String,
    pub tag: Option<ParsedTag>,
    pub tag_error: Option<TagError>,
    pub children: Option<Vec<FieldNode>>,
    /// The shape passed through a slice or array
    pub repeated: bool,
    /// The shape re-entered a type already being resolved
    pub recursive: bool,
}

impl FieldNode {
    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    pub fn required(&self) -> bool {
        self.tag.as_ref().map(|t| t.required).unwrap_or(false)
    }

    pub fn example(&self) -> Option<&str> {
        self.tag.as_ref().and_then(|t| t.example.as_deref())
    }

    /// Nodes in depth-first pre-order, this one first
    pub fn walk(&self) -> Vec<&FieldNode> {
        let mut nodes = vec![self];
        for child in self.children.iter().flatten() {
            nodes.extend(child.walk());
        }
        nodes
    }
}

/// A type implementing the capability, with its resolved field tree
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedType {
    pub id: TypeId,
    pub key: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<FieldNode>,
}

impl MatchedType {
    /// Number of nodes carrying a tag error, subtrees included
    pub fn tag_error_count(&self) -> usize {
        self.fields
            .iter()
            .flat_map(|f| f.walk())
            .filter(|n| n.tag_error.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> FieldNode {
        FieldNode {
            name: name.to_string(),
            field: name.to_string(),
            doc: String::new(),
            tag: Some(ParsedTag::new(name)),
            tag_error: None,
            children: None,
            repeated: false,
            recursive: false,
        }
    }

    #[test]
    fn test_walk_is_pre_order() {
        let mut parent = leaf("parent");
        parent.children = Some(vec![leaf("a"), leaf("b")]);
        let names: Vec<_> = parent.walk().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["parent", "a", "b"]);
    }

    #[test]
    fn test_tag_error_count() {
        let mut broken = leaf("broken");
        broken.tag = None;
        broken.tag_error = Some(TagError::Missing {
            key: "yaml".to_string(),
        });
        let mut parent = leaf("parent");
        parent.children = Some(vec![leaf("a"), broken]);

        let matched = MatchedType {
            id: TypeId::new("app", "Conf"),
            key: None,
            description: None,
            fields: vec![parent, leaf("b")],
        };
        assert_eq!(matched.tag_error_count(), 1);
    }
}
