//! Decides how much of the code around a located literal gets replaced.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tree_sitter::Node;

use crate::tree::{named_children, ParsedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    /// The literal, or a chain rooted at it, is a whole expression statement.
    Bare,
    /// The chain rooted at the literal is the only assigned value; the
    /// whole statement goes.
    AssignmentRhs,
    /// Anything else; only the literal is replaced.
    ChainOperand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context<'t> {
    pub kind: ContextKind,
    pub enclosing: Node<'t>,
    pub discarded: Vec<String>,
}

impl<'t> Context<'t> {
    fn operand(enclosing: Node<'t>) -> Self {
        Self {
            kind: ContextKind::ChainOperand,
            enclosing,
            discarded: Vec::new(),
        }
    }
}

pub fn resolve_context<'t>(parsed: &ParsedFile, literal: Node<'t>) -> Context<'t> {
    // `&lit` is replaced as a unit so no dangling `&` is left behind.
    let operand = literal
        .parent()
        .filter(|p| p.kind() == "unary_expression" && operator(parsed, *p) == Some("&"))
        .unwrap_or(literal);

    // Climb `(lit)`, `lit.A`, `lit.A(..)`, `lit.A(..).B(..)`.
    let mut chain = operand;
    while let Some(parent) = chain.parent() {
        let climbs = match parent.kind() {
            "selector_expression" => parent.child_by_field_name("operand") == Some(chain),
            "call_expression" => parent.child_by_field_name("function") == Some(chain),
            "parenthesized_expression" => true,
            _ => false,
        };
        if !climbs {
            break;
        }
        chain = parent;
    }

    let context = chain
        .parent()
        .and_then(|parent| match parent.kind() {
            "expression_statement" => Some(Context {
                kind: ContextKind::Bare,
                enclosing: parent,
                discarded: Vec::new(),
            }),
            "expression_list" => assignment_context(parsed, parent, chain),
            _ => None,
        })
        .unwrap_or_else(|| Context::operand(operand));
    debug!(
        kind = ?context.kind,
        line = context.enclosing.start_position().row + 1,
        "resolved context"
    );
    context
}

/// `x, err := chain` or a local `var x = chain`. A value list holding
/// anything besides the chain keeps its statement.
fn assignment_context<'t>(
    parsed: &ParsedFile,
    values: Node<'t>,
    chain: Node<'t>,
) -> Option<Context<'t>> {
    if named_children(values) != [chain] {
        return None;
    }
    let holder = values.parent()?;
    match holder.kind() {
        "assignment_statement" if operator(parsed, holder) != Some("=") => None,
        "assignment_statement" | "short_var_declaration" => {
            if holder.child_by_field_name("right") != Some(values) {
                return None;
            }
            let discarded = holder
                .child_by_field_name("left")
                .map(named_children)
                .unwrap_or_default()
                .into_iter()
                .map(|lhs| parsed.text(lhs))
                .filter(|name| *name != "_")
                .map(str::to_string)
                .collect();
            Some(Context {
                kind: ContextKind::AssignmentRhs,
                enclosing: holder,
                discarded,
            })
        }
        "var_spec" => {
            let decl = single_local_var(holder)?;
            let mut cursor = holder.walk();
            let discarded = holder
                .children_by_field_name("name", &mut cursor)
                .map(|name| parsed.text(name))
                .filter(|name| *name != "_")
                .map(str::to_string)
                .collect();
            Some(Context {
                kind: ContextKind::AssignmentRhs,
                enclosing: decl,
                discarded,
            })
        }
        _ => None,
    }
}

/// The `var` declaration holding `spec`, if it is its only spec and sits
/// inside a function body.
fn single_local_var(spec: Node<'_>) -> Option<Node<'_>> {
    let mut decl = spec.parent()?;
    if decl.kind() == "var_spec_list" {
        if named_children(decl).len() != 1 {
            return None;
        }
        decl = decl.parent()?;
    }
    let local = decl.kind() == "var_declaration"
        && decl.parent().is_some_and(|p| p.kind() != "source_file");
    local.then_some(decl)
}

fn operator<'s>(parsed: &'s ParsedFile, node: Node<'_>) -> Option<&'s str> {
    node.child_by_field_name("operator").map(|op| parsed.text(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;
    use crate::locator::locate;
    use crate::tree::parse;

    fn resolve(src: &str, line: usize) -> (ContextKind, String, Vec<String>) {
        let parsed = parse(src).unwrap();
        let found = locate(&parsed, line, &MockConfig::default()).unwrap();
        let context = resolve_context(&parsed, found.literal);
        (
            context.kind,
            parsed.text(context.enclosing).to_string(),
            context.discarded,
        )
    }

    #[test]
    fn test_assignment_chain() {
        let src = "package p\n\nfunc f() {\n\trsp, err := pkg.BarRequest{Field: x}.Send(ctx).DecodeResponse()\n}\n";
        let (kind, enclosing, discarded) = resolve(src, 4);
        assert_eq!(kind, ContextKind::AssignmentRhs);
        assert_eq!(discarded, vec!["rsp", "err"]);
        assert!(enclosing.starts_with("rsp, err :="));
    }

    #[test]
    fn test_blank_identifiers_not_reported() {
        let src = "package p\n\nfunc f() {\n\t_, err = pkg.BarRequest{}.Send(ctx).DecodeResponse()\n}\n";
        let (kind, _, discarded) = resolve(src, 4);
        assert_eq!(kind, ContextKind::AssignmentRhs);
        assert_eq!(discarded, vec!["err"]);
    }

    #[test]
    fn test_bare_statement() {
        let src = "package p\n\nfunc f() {\n\tpkg.FooEvent{ID: 1}\n\tpkg.BarRequest{}.Send(ctx)\n}\n";
        let (kind, enclosing, _) = resolve(src, 4);
        assert_eq!(kind, ContextKind::Bare);
        assert_eq!(enclosing, "pkg.FooEvent{ID: 1}");

        let (kind, enclosing, _) = resolve(src, 5);
        assert_eq!(kind, ContextKind::Bare);
        assert_eq!(enclosing, "pkg.BarRequest{}.Send(ctx)");
    }

    #[test]
    fn test_call_argument_is_operand() {
        let src = "package p\n\nfunc f() {\n\tdo(ctx, &pkg.BarRequest{})\n\tx := wrap(pkg.FooEvent{})\n}\n";
        let (kind, enclosing, _) = resolve(src, 4);
        assert_eq!(kind, ContextKind::ChainOperand);
        assert_eq!(enclosing, "&pkg.BarRequest{}");

        let (kind, enclosing, _) = resolve(src, 5);
        assert_eq!(kind, ContextKind::ChainOperand);
        assert_eq!(enclosing, "pkg.FooEvent{}");
    }

    #[test]
    fn test_op_assign_is_operand() {
        let src = "package p\n\nfunc f() {\n\tcount += pkg.CountRequest{}.N\n}\n";
        let (kind, _, _) = resolve(src, 4);
        assert_eq!(kind, ContextKind::ChainOperand);
    }

    #[test]
    fn test_multi_value_assignment_is_operand() {
        let src = "package p\n\nfunc f() {\n\ta, b := pkg.XRequest{}, compute()\n\tvar c, d = pkg.YRequest{}, 2\n}\n";
        let (kind, enclosing, discarded) = resolve(src, 4);
        assert_eq!(kind, ContextKind::ChainOperand);
        assert_eq!(enclosing, "pkg.XRequest{}");
        assert!(discarded.is_empty());

        let (kind, enclosing, _) = resolve(src, 5);
        assert_eq!(kind, ContextKind::ChainOperand);
        assert_eq!(enclosing, "pkg.YRequest{}");
    }

    #[test]
    fn test_local_var_declaration() {
        let src = "package p\n\nfunc f() {\n\tvar req = pkg.BarRequest{}\n}\n\nvar global = pkg.BarRequest{}\n";
        let (kind, enclosing, discarded) = resolve(src, 4);
        assert_eq!(kind, ContextKind::AssignmentRhs);
        assert_eq!(discarded, vec!["req"]);
        assert_eq!(enclosing, "var req = pkg.BarRequest{}");

        let (kind, _, _) = resolve(src, 7);
        assert_eq!(kind, ContextKind::ChainOperand);
    }
}
