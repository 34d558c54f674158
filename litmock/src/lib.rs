//! Rewrites a Go request or event struct literal into a mock-expectation call.
//!
//! The engine parses a Go file with tree-sitter, finds the literal at a
//! line, and replaces the code around it with
//! `m.ExpectRequest(test.RequestEqualTo(..)).RespondWith(..)` or
//! `m.ExpectFirehoseEvent(test.EventMatching(..))`. Everything outside the
//! replaced span is reproduced byte for byte.

pub mod error;
pub mod span;
pub mod tree;
pub mod classify;
pub mod locator;
pub mod context;
pub mod synth;
pub mod splice;
pub mod render;
pub mod config;
pub mod operations;
pub mod editor;
pub mod diff;
pub mod persist;


pub use classify::{QualifiedName, Role};
pub use config::MockConfig;
pub use context::ContextKind;
pub use diff::{generate_unified_diff, DiffStats};
pub use editor::{MockEditor, Rewrite};
pub use error::{Error, Result};
pub use operations::{NodeLocation, RewriteReport};
pub use render::render;
pub use splice::Edit;
pub use tree::{parse, ParsedFile};
