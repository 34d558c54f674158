//! Source positions of syntax nodes.
//!
//! tree-sitter reports 0-based rows and byte columns; [`Span`] turns them
//! into the 1-based lines and columns `go/token` prints, and keeps the
//! half-open byte range used for slicing the source.

use tree_sitter::Node;

/// Inclusive line range plus half-open byte range of a node.
///
/// Lines and columns are 1-based; columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn of(node: Node<'_>) -> Self {
        Self::between(node, node)
    }

    /// From the start of `first` to the end of `last`.
    pub fn between(first: Node<'_>, last: Node<'_>) -> Self {
        let start = first.start_position();
        let end = last.end_position();
        Self {
            lo: first.start_byte(),
            hi: last.end_byte(),
            start_line: start.row + 1,
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }

    pub fn covers_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }
}

/// Number of lines in `source`; a trailing newline does not open a new one.
pub fn line_count(source: &str) -> usize {
    source.lines().count()
}

/// Leading spaces and tabs of a 1-based line.
pub fn line_indent(source: &str, line: usize) -> &str {
    let Some(text) = source.lines().nth(line.saturating_sub(1)) else {
        return "";
    };
    let width = text.len() - text.trim_start_matches([' ', '\t']).len();
    &text[..width]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        assert_eq!(line_count("package p\n"), 1);
        assert_eq!(line_count("package p\n\nfunc f() {}"), 3);
        assert_eq!(line_count(""), 0);
    }

    #[test]
    fn test_line_indent() {
        let src = "package p\n\tfoo()\n\t\t  bar()\n";
        assert_eq!(line_indent(src, 1), "");
        assert_eq!(line_indent(src, 2), "\t");
        assert_eq!(line_indent(src, 3), "\t\t  ");
        assert_eq!(line_indent(src, 9), "");
    }

    #[test]
    fn test_containment() {
        let outer = Span { lo: 0, hi: 10, start_line: 1, start_col: 1, end_line: 2, end_col: 3 };
        let inner = Span { lo: 2, hi: 10, start_line: 1, start_col: 3, end_line: 2, end_col: 3 };
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.covers_line(2));
        assert!(!inner.covers_line(3));
    }
}
