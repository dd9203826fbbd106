//! Shared fixture helpers: terse builders for ESTree-style module trees.
#![allow(dead_code)]

use complexmap::ast::estree::Node;
use complexmap::SourceModule;
use serde_json::{json, Value};

pub fn tree(value: &Value) -> Node {
    Node::from_value(value).expect("fixture trees are valid")
}

pub fn module(value: &Value, path: &str) -> SourceModule<Node> {
    SourceModule::new(tree(value), path)
}

pub fn program(body: Vec<Value>) -> Value {
    json!({"type": "Program", "body": body})
}

/// `require("<path>");`
pub fn require_stmt(path: &str) -> Value {
    json!({
        "type": "ExpressionStatement",
        "expression": {
            "type": "CallExpression",
            "callee": {"type": "Identifier", "name": "require"},
            "arguments": [{"type": "Literal", "value": path}]
        }
    })
}

/// `"<text>";`
pub fn string_stmt(text: &str) -> Value {
    json!({
        "type": "ExpressionStatement",
        "expression": {"type": "Literal", "value": text}
    })
}

/// A module whose body is a list of `require` calls followed by one string
/// statement, the shape the dependency fixtures use throughout.
pub fn requiring_module(path: &str, requires: &[&str]) -> SourceModule<Node> {
    let mut body: Vec<Value> = requires.iter().map(|r| require_stmt(r)).collect();
    body.push(string_stmt("m"));
    module(&program(body), path)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
