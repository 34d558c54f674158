//! Finds the request or event literal a line number refers to.
//!
//! Two passes. The first only looks at the right-hand sides of assignments
//! and local `var` declarations, in document order, which is where these
//! literals usually live (`rsp, err := pkg.FooRequest{...}.Send(ctx)...`).
//! The second scans the whole file. Both return the deepest literal along
//! the first branch that covers the line.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use tree_sitter::Node;

use crate::classify::{classify, classify_name, QualifiedName, Role};
use crate::config::MockConfig;
use crate::error::{Error, Result};
use crate::span::Span;
use crate::synth::{EVENT_MATCHER, REQUEST_MATCHER};
use crate::tree::{descendants, named_children, ParsedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Assignment,
    FullScan,
}

#[derive(Debug, Clone)]
pub struct Located<'t> {
    pub literal: Node<'t>,
    pub role: Role,
    pub type_name: QualifiedName,
    pub span: Span,
    pub tier: Tier,
}

pub fn locate<'t>(parsed: &'t ParsedFile, line: usize, config: &MockConfig) -> Result<Located<'t>> {
    let mut search = Search {
        parsed,
        config,
        line,
        ambiguous: None,
    };

    for value in descendants(parsed.root()).filter_map(assigned_values) {
        if let Some(found) = search.deepest(value, Tier::Assignment) {
            return Ok(found);
        }
    }

    debug!(line, "no literal in assignments, scanning whole file");
    if let Some(found) = search.deepest(parsed.root(), Tier::FullScan) {
        return Ok(found);
    }

    match search.ambiguous {
        Some(type_text) => Err(Error::AmbiguousType { line, type_text }),
        None => Err(Error::NoMatch { line }),
    }
}

/// Right-hand side of an assignment (`=`, `:=`, op-assign) or of a `var`
/// spec inside a function body.
fn assigned_values(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "assignment_statement" | "short_var_declaration" => node.child_by_field_name("right"),
        "var_spec" => {
            let mut decl = node.parent()?;
            if decl.kind() == "var_spec_list" {
                decl = decl.parent()?;
            }
            let local = decl.parent().is_some_and(|p| p.kind() != "source_file");
            if local {
                node.child_by_field_name("value")
            } else {
                None
            }
        }
        _ => None,
    }
}

struct Search<'t, 'c> {
    parsed: &'t ParsedFile,
    config: &'c MockConfig,
    line: usize,
    /// Text of the first literal type on the line that names a role but is
    /// not a plain or qualified identifier.
    ambiguous: Option<String>,
}

impl<'t> Search<'t, '_> {
    fn deepest(&mut self, node: Node<'t>, tier: Tier) -> Option<Located<'t>> {
        let span = Span::of(node);
        if !span.covers_line(self.line) {
            return None;
        }
        for child in named_children(node) {
            if let Some(found) = self.deepest(child, tier) {
                return Some(found);
            }
        }
        if node.kind() == "composite_literal" {
            self.candidate(node, span, tier)
        } else {
            None
        }
    }

    fn candidate(&mut self, literal: Node<'t>, span: Span, tier: Tier) -> Option<Located<'t>> {
        let ty = literal.child_by_field_name("type")?;
        if self.is_matcher_argument(literal) {
            trace!(line = self.line, "literal already wrapped in a matcher");
            return None;
        }
        let Some(type_name) = QualifiedName::from_type(self.parsed, ty) else {
            let text = self.parsed.text(ty);
            if self.ambiguous.is_none() && classify_name(text) != Role::None {
                debug!(line = self.line, type_text = text, "literal type is not a simple name");
                self.ambiguous = Some(text.to_string());
            }
            return None;
        };
        let role = classify(self.parsed, literal);
        trace!(line = span.start_line, %type_name, %role, "literal covers line");
        if role == Role::None {
            return None;
        }
        Some(Located {
            literal,
            role,
            type_name,
            span,
            tier,
        })
    }

    /// `test.RequestEqualTo(lit)` or `test.EventMatching(lit)`: the output
    /// of an earlier rewrite.
    fn is_matcher_argument(&self, literal: Node<'_>) -> bool {
        let Some(args) = literal.parent().filter(|p| p.kind() == "argument_list") else {
            return false;
        };
        if named_children(args).len() != 1 {
            return false;
        }
        let Some(function) = args
            .parent()
            .filter(|call| call.kind() == "call_expression")
            .and_then(|call| call.child_by_field_name("function"))
            .filter(|f| f.kind() == "selector_expression")
        else {
            return false;
        };
        let operand = function.child_by_field_name("operand").map(|n| self.parsed.text(n));
        let field = function.child_by_field_name("field").map(|n| self.parsed.text(n));
        operand == Some(self.config.matcher_identifier.as_str())
            && matches!(field, Some(REQUEST_MATCHER | EVENT_MATCHER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;

    fn locate_src(src: &str, line: usize) -> Result<(Role, String, Tier, usize)> {
        let parsed = parse(src).unwrap();
        locate(&parsed, line, &MockConfig::default())
            .map(|l| (l.role, l.type_name.to_string(), l.tier, l.span.start_line))
    }

    #[test]
    fn test_locate_in_assignment_rhs() {
        let src = "package p\n\nfunc f() {\n\trsp, err := pkg.BarRequest{\n\t\tField: x,\n\t}.Send(ctx).DecodeResponse()\n}\n";
        for line in 4..=6 {
            let (role, name, tier, start) = locate_src(src, line).unwrap();
            assert_eq!(role, Role::Request);
            assert_eq!(name, "pkg.BarRequest");
            assert_eq!(tier, Tier::Assignment);
            assert_eq!(start, 4);
        }
    }

    #[test]
    fn test_locate_prefers_deepest_literal() {
        let src = "package p\n\nfunc f() {\n\tx := pkg.OuterRequest{Inner: pkg.InnerEvent{A: 1}}\n}\n";
        let (role, name, _, _) = locate_src(src, 4).unwrap();
        assert_eq!(name, "pkg.InnerEvent");
        assert_eq!(role, Role::Event);
    }

    #[test]
    fn test_locate_skips_roleless_inner_literal() {
        let src = "package p\n\nfunc f() {\n\tx := pkg.OuterRequest{Inner: pkg.Meta{A: 1}}\n}\n";
        let (_, name, _, _) = locate_src(src, 4).unwrap();
        assert_eq!(name, "pkg.OuterRequest");
    }

    #[test]
    fn test_locate_falls_back_to_full_scan() {
        let src = "package p\n\nfunc f() {\n\tpkg.FooEvent{\n\t\tID: 1,\n\t}\n}\n";
        let (role, _, tier, _) = locate_src(src, 5).unwrap();
        assert_eq!(tier, Tier::FullScan);
        assert_eq!(role, Role::Event);
    }

    #[test]
    fn test_locate_first_sibling_wins() {
        let src = "package p\n\nfunc f() {\n\tsend(AEvent{}, BEvent{})\n}\n";
        let (_, name, _, _) = locate_src(src, 4).unwrap();
        assert_eq!(name, "AEvent");
    }

    #[test]
    fn test_locate_var_declaration() {
        let src = "package p\n\nvar top = pkg.TopRequest{}\n\nfunc f() {\n\tvar req = pkg.BarRequest{}\n}\n";
        assert_eq!(locate_src(src, 6).unwrap().2, Tier::Assignment);
        assert_eq!(locate_src(src, 3).unwrap().2, Tier::FullScan);
    }

    #[test]
    fn test_skips_literal_inside_matcher() {
        let src = "package p\n\nfunc f() {\n\tm.ExpectRequest(test.RequestEqualTo(pkg.BarRequest{Field: x})).RespondWith(pkg.BarResponse{})\n\tm.ExpectFirehoseEvent(test.EventMatching(pkg.FooEvent{}))\n\tcheck(other.RequestEqualTo(pkg.BarRequest{}))\n}\n";
        assert!(matches!(locate_src(src, 4), Err(Error::NoMatch { line: 4 })));
        assert!(matches!(locate_src(src, 5), Err(Error::NoMatch { line: 5 })));
        assert_eq!(locate_src(src, 6).unwrap().1, "pkg.BarRequest");
    }

    #[test]
    fn test_matcher_identifier_follows_config() {
        let src = "package p\n\nfunc f() {\n\tm.ExpectFirehoseEvent(test.EventMatching(pkg.FooEvent{}))\n}\n";
        let parsed = parse(src).unwrap();
        let config = MockConfig::new("mock", "match");
        let found = locate(&parsed, 4, &config).unwrap();
        assert_eq!(found.type_name.to_string(), "pkg.FooEvent");
    }

    #[test]
    fn test_no_match() {
        let src = "package p\n\nfunc f() {\n\tx := pkg.Thing{}\n\ty := 2\n}\n";
        assert!(matches!(locate_src(src, 4), Err(Error::NoMatch { line: 4 })));
        assert!(matches!(locate_src(src, 5), Err(Error::NoMatch { line: 5 })));
    }

    #[test]
    fn test_ambiguous_type() {
        let src = "package p\n\nfunc f() {\n\tx := []pkg.BarRequest{}\n}\n";
        match locate_src(src, 4) {
            Err(Error::AmbiguousType { line, type_text }) => {
                assert_eq!(line, 4);
                assert_eq!(type_text, "[]pkg.BarRequest");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
