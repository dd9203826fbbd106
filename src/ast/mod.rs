//! The seam between the metric engine and concrete tree shapes. The core
//! never touches parser-specific node layouts; every access goes through
//! [`AstAdapter`], so the same engine runs over output from different
//! parser families without modification.

pub mod estree;

use serde::{Deserialize, Serialize};

/// A scalar node property (operator sigil, identifier name, literal value,
/// shorthand/async flags and similar).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attr {
    Bool(bool),
    Num(f64),
    Str(String),
}

impl Attr {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attr::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Attr::Bool(true))
    }
}

/// Capabilities the engine requires from a concrete tree shape.
///
/// Implementations must tolerate absent fields: `children` on a missing or
/// null field yields an empty sequence rather than an error.
pub trait AstAdapter {
    type Node;

    /// The construct kind of a node, e.g. `"IfStatement"`.
    fn kind<'n>(&self, node: &'n Self::Node) -> &'n str;

    /// The child nodes stored under `field`, in source order.
    fn children<'n>(&self, node: &'n Self::Node, field: &str) -> Vec<&'n Self::Node>;

    /// Every field name that holds children on this node, for the generic
    /// fallback walk over unrecognized constructs.
    fn field_names<'n>(&self, node: &'n Self::Node) -> Vec<&'n str>;

    /// Start and end source line of a node, inclusive.
    fn span(&self, node: &Self::Node) -> (usize, usize);

    /// A scalar property of a node, when present.
    fn attr(&self, node: &Self::Node, name: &str) -> Option<Attr>;
}
