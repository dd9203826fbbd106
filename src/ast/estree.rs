//! Owned generic tree in the ESTree shape, plus its adapter. This is the
//! reference [`AstAdapter`] implementation: front ends that already hold
//! ESTree-style JSON (esprima, acorn, espree and friends) convert it with
//! [`Node::from_value`] and hand it straight to the engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AstAdapter, Attr};

/// One node of a generic, shape-erased syntax tree: a kind tag, named child
/// lists, scalar attributes and an inclusive line span.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: String,
    #[serde(default)]
    pub fields: IndexMap<String, Vec<Node>>,
    #[serde(default)]
    pub attrs: IndexMap<String, Attr>,
    pub span: (usize, usize),
}

impl Node {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: IndexMap::new(),
            attrs: IndexMap::new(),
            span: (1, 1),
        }
    }

    /// Convert an ESTree-style JSON value into a generic tree.
    ///
    /// Object-valued properties carrying a `type` tag become single-child
    /// fields, arrays become child lists (non-node elements are skipped),
    /// scalars become attributes, and `loc` populates the line span.
    /// Returns `None` if the value is not an object with a string `type`.
    pub fn from_value(value: &Value) -> Option<Node> {
        let object = value.as_object()?;
        let kind = object.get("type")?.as_str()?.to_string();
        let mut node = Node::new(kind);

        if let Some(loc) = object.get("loc") {
            let start = loc["start"]["line"].as_u64().unwrap_or(1) as usize;
            let end = loc["end"]["line"].as_u64().unwrap_or(start as u64) as usize;
            node.span = (start, end);
        }

        for (key, property) in object {
            if matches!(key.as_str(), "type" | "loc" | "range" | "start" | "end") {
                continue;
            }
            match property {
                Value::Object(o) if o.contains_key("type") => {
                    let child = Node::from_value(property)?;
                    node.fields.insert(key.clone(), vec![child]);
                }
                Value::Array(items) => {
                    let children = items.iter().filter_map(Node::from_value).collect();
                    node.fields.insert(key.clone(), children);
                }
                Value::Bool(b) => {
                    node.attrs.insert(key.clone(), Attr::Bool(*b));
                }
                Value::Number(n) => {
                    if let Some(v) = n.as_f64() {
                        node.attrs.insert(key.clone(), Attr::Num(v));
                    }
                }
                Value::String(s) => {
                    node.attrs.insert(key.clone(), Attr::Str(s.clone()));
                }
                // null fields and non-node objects (regex descriptors etc.)
                // contribute nothing
                _ => {}
            }
        }
        Some(node)
    }
}

/// Adapter over [`Node`]
#[derive(Clone, Copy, Debug, Default)]
pub struct EstreeAdapter;

impl AstAdapter for EstreeAdapter {
    type Node = Node;

    fn kind<'n>(&self, node: &'n Node) -> &'n str {
        &node.kind
    }

    fn children<'n>(&self, node: &'n Node, field: &str) -> Vec<&'n Node> {
        node.fields
            .get(field)
            .map(|children| children.iter().collect())
            .unwrap_or_default()
    }

    fn field_names<'n>(&self, node: &'n Node) -> Vec<&'n str> {
        node.fields.keys().map(String::as_str).collect()
    }

    fn span(&self, node: &Node) -> (usize, usize) {
        node.span
    }

    fn attr(&self, node: &Node, name: &str) -> Option<Attr> {
        node.attrs.get(name).cloned()
    }
}
