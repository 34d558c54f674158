//! Literal type name to [`Role`].
//!
//! Purely a naming heuristic: a type whose local name contains `Request` is
//! a request, one containing `Event` is an event. No type resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::tree::ParsedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Request,
    Event,
    None,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Request => "request",
            Role::Event => "event",
            Role::None => "none",
        })
    }
}

/// `pkg.Name` or `Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub qualifier: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(qualifier: Option<&str>, name: &str) -> Self {
        Self {
            qualifier: qualifier.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Reads a `type_identifier` (`Name`) or `qualified_type` (`pkg.Name`)
    /// node.
    pub fn from_type(parsed: &ParsedFile, ty: Node<'_>) -> Option<Self> {
        match ty.kind() {
            "type_identifier" => Some(Self::new(None, parsed.text(ty))),
            "qualified_type" => {
                let pkg = ty.child_by_field_name("package")?;
                let name = ty.child_by_field_name("name")?;
                Some(Self::new(Some(parsed.text(pkg)), parsed.text(name)))
            }
            _ => None,
        }
    }

    pub fn role(&self) -> Role {
        classify_name(&self.name)
    }

    /// `pkg.FooRequest` becomes `pkg.FooResponse`; only the first
    /// occurrence is replaced.
    pub fn response(&self) -> Self {
        Self {
            qualifier: self.qualifier.clone(),
            name: self.name.replacen("Request", "Response", 1),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(pkg) => write!(f, "{}.{}", pkg, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A name carrying both markers is a request.
pub fn classify_name(name: &str) -> Role {
    if name.contains("Request") {
        Role::Request
    } else if name.contains("Event") {
        Role::Event
    } else {
        Role::None
    }
}

/// Role of a `composite_literal`; `None` for any other node, and for types
/// that are not a plain or qualified name.
pub fn classify(parsed: &ParsedFile, literal: Node<'_>) -> Role {
    if literal.kind() != "composite_literal" {
        return Role::None;
    }
    literal
        .child_by_field_name("type")
        .and_then(|ty| QualifiedName::from_type(parsed, ty))
        .map_or(Role::None, |name| name.role())
}
