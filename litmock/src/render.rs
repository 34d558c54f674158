//! Renders the source with at most one [`Edit`] applied.
//!
//! Everything outside the edited span is copied byte for byte: comments,
//! blank lines and odd spacing included.

use tracing::warn;

use crate::splice::Edit;
use crate::tree::ParsedFile;

pub fn render(parsed: &ParsedFile, edit: Option<&Edit>) -> String {
    let source = parsed.source.as_str();
    let Some(edit) = edit else {
        return source.to_string();
    };
    match (source.get(..edit.span.lo), source.get(edit.span.hi..)) {
        (Some(before), Some(after)) => {
            let mut out = String::with_capacity(before.len() + edit.text.len() + after.len());
            out.push_str(before);
            out.push_str(&edit.text);
            out.push_str(after);
            out
        }
        _ => {
            warn!(lo = edit.span.lo, hi = edit.span.hi, "edit outside the source, ignoring it");
            source.to_string()
        }
    }
}
