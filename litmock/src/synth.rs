//! Builds the mock-expectation expression that replaces a literal.
//!
//! Requests become
//! `m.ExpectRequest(test.RequestEqualTo(<copy>)).RespondWith(<Resp>{})`,
//! events become `m.ExpectFirehoseEvent(test.EventMatching(<copy>))`.
//!
//! The copy reuses the literal's source text. Element text is never
//! reformatted, so field alignment in the source survives.

use tracing::debug;
use tree_sitter::Node;

use crate::classify::{QualifiedName, Role};
use crate::config::MockConfig;
use crate::span::Span;
use crate::tree::{named_children, ParsedFile};

pub const REQUEST_MATCHER: &str = "RequestEqualTo";
pub const EVENT_MATCHER: &str = "EventMatching";
const EXPECT_REQUEST: &str = "ExpectRequest";
const EXPECT_EVENT: &str = "ExpectFirehoseEvent";
const RESPOND_WITH: &str = "RespondWith";

pub struct Synthesizer<'a> {
    config: &'a MockConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(config: &'a MockConfig) -> Self {
        Self { config }
    }

    /// `None` for [`Role::None`]. `indent` is the indentation of the line
    /// the replaced code starts on.
    pub fn synthesize(
        &self,
        parsed: &ParsedFile,
        literal: Node<'_>,
        role: Role,
        type_name: &QualifiedName,
        indent: &str,
    ) -> Option<String> {
        let expect = &self.config.expect_identifier;
        let matcher = &self.config.matcher_identifier;
        let copy = copy_literal(parsed, literal, indent);
        let text = match role {
            Role::Request => format!(
                "{expect}.{EXPECT_REQUEST}({matcher}.{REQUEST_MATCHER}({copy})).{RESPOND_WITH}({}{{}})",
                type_name.response()
            ),
            Role::Event => format!("{expect}.{EXPECT_EVENT}({matcher}.{EVENT_MATCHER}({copy}))"),
            Role::None => return None,
        };
        debug!(%role, %type_name, len = text.len(), "synthesized expectation");
        Some(text)
    }
}

/// A literal spread over several lines is laid out one element per line,
/// one tab deeper than `indent`. Literals holding comments are copied
/// verbatim so the comments survive.
fn copy_literal(parsed: &ParsedFile, literal: Node<'_>, indent: &str) -> String {
    let verbatim = parsed.text(literal).to_string();
    let (Some(ty), Some(body)) = (
        literal.child_by_field_name("type"),
        literal.child_by_field_name("body"),
    ) else {
        return verbatim;
    };
    if parsed.comments.any_within(&Span::of(literal)) {
        debug!("literal contains comments, copying it verbatim");
        return verbatim;
    }
    let elements = named_children(body);
    let single_line = body.start_position().row == body.end_position().row;
    if single_line || elements.is_empty() {
        return verbatim;
    }

    let mut out = format!("{}{{", parsed.text(ty));
    for element in elements {
        out.push('\n');
        out.push_str(indent);
        out.push('\t');
        out.push_str(parsed.text(element));
        out.push(',');
    }
    out.push('\n');
    out.push_str(indent);
    out.push('}');
    out
}
