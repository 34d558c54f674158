//! Turns a plan and its replacement text into a text edit.
//!
//! The syntax tree is never mutated. An [`Edit`] replaces one byte range of
//! the source, and [`crate::render`] applies it.

use tracing::debug;

use crate::operations::RewritePlan;
use crate::span::Span;

/// Replacement text for one span of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub text: String,
}

/// Covers the plan's enclosing node: the statement for `Bare` and
/// `AssignmentRhs`, the (possibly `&`-prefixed) literal for `ChainOperand`.
pub fn splice(plan: &RewritePlan<'_>, replacement: String) -> Edit {
    let span = Span::of(plan.enclosing);
    debug!(
        context = ?plan.context,
        line = span.start_line,
        end_line = span.end_line,
        "spliced replacement"
    );
    Edit {
        span,
        text: replacement,
    }
}
