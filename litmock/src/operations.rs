use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::classify::{QualifiedName, Role};
use crate::context::ContextKind;
use crate::locator::Tier;
use crate::span::Span;

/// Everything decided before any text is produced.
#[derive(Debug, Clone)]
pub struct RewritePlan<'t> {
    pub literal: Node<'t>,
    /// Node replaced by the splice: a statement for `Bare` and
    /// `AssignmentRhs`, the literal itself for `ChainOperand`.
    pub enclosing: Node<'t>,
    pub context: ContextKind,
    pub role: Role,
    pub type_name: QualifiedName,
    pub tier: Tier,
    /// Left-hand side names dropped with a replaced assignment.
    pub discarded: Vec<String>,
}

/// Location of a node (for reporting)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLocation {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl From<Span> for NodeLocation {
    fn from(span: Span) -> Self {
        Self {
            line: span.start_line,
            column: span.start_col,
            end_line: span.end_line,
            end_column: span.end_col,
        }
    }
}

/// Summary of one rewrite, printed by `--format json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
    pub role: Role,
    pub context: ContextKind,
    pub tier: Tier,
    pub type_name: String,
    pub replaced: NodeLocation,
    pub original: String,      // Source text of the replaced node
    pub replacement: String,   // Rendered text that took its place
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_comment: Option<String>,
}
