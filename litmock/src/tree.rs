//! Source text to [`ParsedFile`]: the tree-sitter syntax tree plus the
//! comment positions needed to keep comments attached to rewritten code.

use tree_sitter::{Node, Parser, Tree};
use tracing::debug;

use crate::error::{Error, Result};
use crate::span::Span;

/// One parsed Go file. The tree is never mutated; rewrites are applied to
/// the source text (see [`crate::splice`]).
#[derive(Debug)]
pub struct ParsedFile {
    pub source: String,
    pub tree: Tree,
    pub comments: CommentMap,
}

impl ParsedFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by a node.
    pub fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    pub fn line_count(&self) -> usize {
        crate::span::line_count(&self.source)
    }

    /// See [`CommentMap::leading`].
    pub fn leading_comment(&self, node: Node<'_>) -> Option<Span> {
        self.comments.leading(&self.source, node)
    }
}

pub fn parse(source: &str) -> Result<ParsedFile> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
        line: 1,
        column: 1,
        message: "parser produced no tree".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        if let Some(node) = descendants(root).find(|n| n.is_error() || n.is_missing()) {
            return Err(syntax_error(source, node));
        }
    }

    let comments = CommentMap::build(root);
    debug!(
        nodes = descendants(root).count(),
        comments = comments.len(),
        "parsed file"
    );
    Ok(ParsedFile {
        source: source.to_string(),
        tree,
        comments,
    })
}

fn syntax_error(source: &str, node: Node<'_>) -> Error {
    let start = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = source.get(node.byte_range()).unwrap_or_default();
        let snippet: String = text.lines().next().unwrap_or_default().chars().take(32).collect();
        format!("unexpected `{}`", snippet)
    };
    Error::Parse {
        line: start.row + 1,
        column: start.column + 1,
        message,
    }
}

/// Pre-order, document-order iterator over `node` and everything below it.
pub fn descendants<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    let mut stack = vec![node];
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
        Some(node)
    })
}

/// Named children, without the comments tree-sitter places between them.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Positions of every comment in the file, in document order.
#[derive(Debug, Default)]
pub struct CommentMap {
    comments: Vec<Span>,
}

impl CommentMap {
    fn build(root: Node<'_>) -> Self {
        let mut comments: Vec<Span> = descendants(root)
            .filter(|n| n.kind() == "comment")
            .map(Span::of)
            .collect();
        comments.sort_by_key(|c| c.lo);
        comments.dedup_by_key(|c| c.lo);
        Self { comments }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// The comment group ending on the line right above `node`: comments
    /// on their own lines, separated from each other and from `node` by
    /// exactly one newline.
    pub fn leading(&self, source: &str, node: Node<'_>) -> Option<Span> {
        let mut idx = self.comments.partition_point(|c| c.hi <= node.start_byte());
        let mut end = node.start_byte();
        let mut group: Option<Span> = None;

        while idx > 0 {
            let comment = self.comments[idx - 1];
            let gap = source.get(comment.hi..end)?;
            if !gap.trim().is_empty() || gap.matches('\n').count() != 1 {
                break;
            }
            if !starts_line(source, comment.lo) {
                break;
            }
            group = Some(match group {
                Some(later) => Span {
                    lo: comment.lo,
                    start_line: comment.start_line,
                    start_col: comment.start_col,
                    ..later
                },
                None => comment,
            });
            end = comment.lo;
            idx -= 1;
        }
        group
    }

    pub fn any_within(&self, span: &Span) -> bool {
        let first = self.comments.partition_point(|c| c.lo < span.lo);
        self.comments.get(first).is_some_and(|c| c.hi <= span.hi)
    }
}

fn starts_line(source: &str, offset: usize) -> bool {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..offset].trim().is_empty()
}
