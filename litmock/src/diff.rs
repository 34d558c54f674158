use std::path::Path;
use similar::{ChangeTag, TextDiff};

/// Line counts of a rewrite's diff
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl DiffStats {
    pub fn summary(&self) -> String {
        format!(
            "Summary:\nLines added: {}\nLines removed: {}",
            self.lines_added, self.lines_removed
        )
    }

    pub fn print_summary(&self) {
        println!("\n{}", self.summary());
    }
}

/// Unified diff of a rewrite, labelled with `path` on both sides.
///
/// The `---`/`+++` header is always present, even when nothing changed, so
/// callers can print the result unconditionally.
pub fn generate_unified_diff(
    path: &Path,
    original: &str,
    modified: &str,
    context_lines: usize,
) -> (String, DiffStats) {
    let diff = TextDiff::from_lines(original, modified);
    let stats = diff
        .iter_all_changes()
        .fold(DiffStats::default(), |mut stats, change| {
            match change.tag() {
                ChangeTag::Insert => stats.lines_added += 1,
                ChangeTag::Delete => stats.lines_removed += 1,
                ChangeTag::Equal => {}
            }
            stats
        });

    let label = path.display();
    let hunks = diff.unified_diff().context_radius(context_lines).to_string();
    (format!("--- {label}\n+++ {label}\n{hunks}"), stats)
}
