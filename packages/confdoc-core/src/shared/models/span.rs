//! Source location types

use serde::{Deserialize, Serialize};

/// Span in a source file (1-based lines, 0-based columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// True if `other` starts on the line right after this span ends.
    pub fn is_directly_above(&self, other: &Span) -> bool {
        self.end_line + 1 == other.start_line
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directly_above() {
        let comment = Span::new(3, 4, 3, 20);
        let field = Span::new(4, 4, 4, 30);
        let far = Span::new(6, 4, 6, 30);

        assert!(comment.is_directly_above(&field));
        assert!(!comment.is_directly_above(&far));
        assert!(field.contains_line(4));
    }
}
