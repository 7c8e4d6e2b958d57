//! Doc comment handling
//!
//! A doc comment is the run of comments directly above a declaration with no
//! blank line in between.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::models::Span;

/// `//go:build`, `//lint:ignore`, `//nolint:...` and friends
static DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^//(?:[a-z0-9]+:[a-z0-9]|nolint\b|line )").expect("valid regex"));

const DESCRIPTION_PREFIX: &str = "+desc=";

/// Cleaned doc comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub text: String,
    pub description: Option<String>,
}

/// Comment run being collected while walking sibling nodes
#[derive(Debug, Default)]
pub struct CommentGroup {
    comments: Vec<(String, Span)>,
}

impl CommentGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment; a gap since the previous one starts a new group.
    pub fn push(&mut self, raw: &str, span: Span) {
        if let Some((_, last)) = self.comments.last() {
            if !last.is_directly_above(&span) {
                self.comments.clear();
            }
        }
        self.comments.push((raw.to_string(), span));
    }

    /// Take the group as the doc of a declaration at `span`.
    ///
    /// The group is cleared either way; it is only returned when its last
    /// comment sits on the line right above the declaration.
    pub fn take_above(&mut self, span: &Span) -> Option<DocComment> {
        let comments = std::mem::take(&mut self.comments);
        match comments.last() {
            Some((_, last)) if last.is_directly_above(span) => {
                let raw: Vec<&str> = comments.iter().map(|(text, _)| text.as_str()).collect();
                Some(doc_from_comments(&raw))
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.comments.clear();
    }
}

/// Build a doc comment from raw comment texts (with their `//` or `/* */`).
pub fn doc_from_comments(raw: &[&str]) -> DocComment {
    let mut lines = Vec::new();
    let mut description = None;

    for comment in raw {
        if DIRECTIVE.is_match(comment) {
            continue;
        }
        for line in comment_lines(comment) {
            match line.trim().strip_prefix(DESCRIPTION_PREFIX) {
                Some(desc) => description = Some(desc.trim().to_string()),
                None => lines.push(line),
            }
        }
    }

    DocComment {
        text: lines.join("\n").trim().to_string(),
        description,
    }
}

/// Text lines of one comment with the markers removed
pub fn comment_lines(raw: &str) -> Vec<String> {
    if let Some(line) = raw.strip_prefix("//") {
        let line = line.strip_prefix(' ').unwrap_or(line);
        return vec![line.trim_end().to_string()];
    }

    let body = raw
        .strip_prefix("/*")
        .map(|b| b.strip_suffix("*/").unwrap_or(b))
        .unwrap_or(raw);
    body.lines().map(|l| l.trim().to_string()).collect()
}
