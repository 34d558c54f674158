use std::fmt;

use tracing::{info, warn};

use crate::config::MockConfig;
use crate::context::{resolve_context, ContextKind};
use crate::error::{Error, Result};
use crate::locator::locate;
use crate::operations::{RewritePlan, RewriteReport};
use crate::render::render;
use crate::span::{line_indent, Span};
use crate::splice::splice;
use crate::synth::Synthesizer;
use crate::tree::{parse, ParsedFile};

/// Rewrites the request or event literal at a line into a mock expectation.
///
/// An editor performs at most one rewrite: [`MockEditor::rewrite_line`]
/// consumes it.
pub struct MockEditor {
    parsed: ParsedFile,
    config: MockConfig,
}

/// Output of a successful rewrite.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub output: String,
    pub report: RewriteReport,
}

impl MockEditor {
    pub fn new(content: &str) -> Result<Self> {
        Self::with_config(content, MockConfig::default())
    }

    pub fn with_config(content: &str, config: MockConfig) -> Result<Self> {
        let parsed = parse(content)?;
        Ok(Self { parsed, config })
    }

    pub fn source(&self) -> &str {
        &self.parsed.source
    }

    pub fn parsed(&self) -> &ParsedFile {
        &self.parsed
    }

    pub fn line_count(&self) -> usize {
        self.parsed.line_count()
    }

    /// Locates, classifies and resolves the context of the literal at
    /// `line` without producing any text.
    pub fn plan(&self, line: usize) -> Result<RewritePlan<'_>> {
        let line_count = self.line_count();
        if line == 0 || line > line_count {
            return Err(Error::InvalidLine { line, line_count });
        }

        let located = locate(&self.parsed, line, &self.config)?;
        let context = resolve_context(&self.parsed, located.literal);
        if !context.discarded.is_empty() {
            warn!(
                line,
                names = ?context.discarded,
                "assigned names are dropped with the replaced statement"
            );
        }

        Ok(RewritePlan {
            literal: located.literal,
            enclosing: context.enclosing,
            context: context.kind,
            role: located.role,
            type_name: located.type_name,
            tier: located.tier,
            discarded: context.discarded,
        })
    }

    pub fn rewrite_line(self, line: usize) -> Result<Rewrite> {
        let plan = self.plan(line)?;
        let parsed = &self.parsed;

        let replaced = Span::of(plan.enclosing);
        let indent = line_indent(&parsed.source, replaced.start_line);
        let replacement = Synthesizer::new(&self.config)
            .synthesize(parsed, plan.literal, plan.role, &plan.type_name, indent)
            .ok_or(Error::NoMatch { line })?;

        // A comment above an operand belongs to its statement, not to it.
        let leading_comment = match plan.context {
            ContextKind::ChainOperand => None,
            _ => parsed
                .leading_comment(plan.enclosing)
                .and_then(|span| parsed.source.get(span.lo..span.hi))
                .map(str::to_string),
        };

        let edit = splice(&plan, replacement);
        let output = render(parsed, Some(&edit));

        info!(
            line,
            role = %plan.role,
            context = ?plan.context,
            type_name = %plan.type_name,
            "rewrote literal"
        );

        let report = RewriteReport {
            file: None,
            line,
            role: plan.role,
            context: plan.context,
            tier: plan.tier,
            type_name: plan.type_name.to_string(),
            replaced: replaced.into(),
            original: parsed.text(plan.enclosing).to_string(),
            replacement: edit.text,
            discarded: plan.discarded,
            leading_comment,
        };
        Ok(Rewrite { output, report })
    }
}

impl fmt::Display for MockEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.parsed, None))
    }
}
