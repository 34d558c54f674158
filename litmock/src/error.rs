use thiserror::Error;
use tree_sitter::LanguageError;

/// Errors surfaced by the rewrite engine.
///
/// None of these leave a half-applied edit behind: the source is only
/// touched after a literal has been located, classified and its context
/// resolved.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("no request or event literal found at line {line}")]
    NoMatch { line: usize },

    #[error("literal type `{type_text}` at line {line} is not a plain or package-qualified name")]
    AmbiguousType { line: usize, type_text: String },

    #[error("line {line} is out of range (source has {line_count} lines)")]
    InvalidLine { line: usize, line_count: usize },

    #[error("failed to load the Go grammar: {0}")]
    Grammar(#[from] LanguageError),
}

impl Error {
    /// True for the outcomes where the input is simply echoed back.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch { .. } | Error::AmbiguousType { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
