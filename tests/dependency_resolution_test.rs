//! Path and alias resolution against the analyzed module set.

mod common;

use common::{module, program, require_stmt, requiring_module, string_stmt};
use complexmap::ast::estree::EstreeAdapter;
use complexmap::{analyse, DependencyPath, ProjectOptions, Settings};
use pretty_assertions::assert_eq;
use serde_json::json;

fn analyse_defaults(
    modules: &[complexmap::SourceModule<complexmap::ast::estree::Node>],
) -> complexmap::ProjectReport {
    analyse(
        modules,
        &EstreeAdapter,
        &Settings::default(),
        &ProjectOptions::default(),
    )
    .expect("analysis succeeds")
}

#[test]
fn relative_and_directory_index_resolution() {
    let modules = vec![
        requiring_module("/b.js", &["./mod"]),
        requiring_module("/mod/index.js", &["./a"]),
        requiring_module("/mod/a.js", &["../b.js"]),
    ];
    let result = analyse_defaults(&modules);

    // "./mod" reaches the directory's index module; "../b.js" matches
    // exactly; "./a" misses "/mod/a.js" because no extension is appended
    assert_eq!(
        result.adjacency_matrix,
        vec![vec![0, 1, 0], vec![0, 0, 0], vec![1, 0, 0]]
    );
}

#[test]
fn esm_imports_resolve_like_requires() {
    let importer = program(vec![json!({
        "type": "ImportDeclaration",
        "specifiers": [],
        "source": {"type": "Literal", "value": "./mod"}
    })]);
    let modules = vec![
        module(&importer, "/b.js"),
        requiring_module("/mod/index.js", &[]),
    ];
    let result = analyse_defaults(&modules);
    assert_eq!(result.adjacency_matrix[0][1], 1);
}

#[test]
fn self_references_never_form_edges() {
    let modules = vec![requiring_module("/a.js", &["/a.js"])];
    let result = analyse_defaults(&modules);
    assert_eq!(result.adjacency_matrix, vec![vec![0]]);
    assert_eq!(result.core_size, Some(0));
}

#[test]
fn unresolved_and_dynamic_hints_are_dropped_silently() {
    let body = program(vec![
        require_stmt("./nowhere"),
        require_stmt("http://example.com/x.js"),
        json!({
            "type": "ExpressionStatement",
            "expression": {
                "type": "CallExpression",
                "callee": {"type": "Identifier", "name": "require"},
                "arguments": [{"type": "Identifier", "name": "dynamic"}]
            }
        }),
        string_stmt("m"),
    ]);
    let modules = vec![module(&body, "/m.js"), requiring_module("/other.js", &[])];
    let result = analyse_defaults(&modules);

    // three hints recorded, none resolved
    assert_eq!(result.reports[0].dependencies.len(), 3);
    assert_eq!(result.reports[0].dependencies[2].path, DependencyPath::Dynamic);
    assert!(result
        .adjacency_matrix
        .iter()
        .all(|row| row.iter().all(|&cell| cell == 0)));
}

fn alias_config_stmt() -> serde_json::Value {
    json!({
        "type": "ExpressionStatement",
        "expression": {
            "type": "CallExpression",
            "callee": {
                "type": "MemberExpression",
                "object": {"type": "Identifier", "name": "require"},
                "property": {"type": "Identifier", "name": "config"}
            },
            "arguments": [{
                "type": "ObjectExpression",
                "properties": [{
                    "type": "Property",
                    "key": {"type": "Identifier", "name": "paths"},
                    "value": {
                        "type": "ObjectExpression",
                        "properties": [{
                            "type": "Property",
                            "key": {"type": "Identifier", "name": "foo"},
                            "value": {"type": "Literal", "value": "/lib/foo.js"}
                        }]
                    }
                }]
            }]
        }
    })
}

#[test]
fn declared_aliases_substitute_during_resolution() {
    let configured = program(vec![alias_config_stmt(), require_stmt("foo")]);
    let modules = vec![
        module(&configured, "/app.js"),
        requiring_module("/lib/foo.js", &[]),
    ];
    let result = analyse_defaults(&modules);

    assert_eq!(result.adjacency_matrix[0][1], 1);
    // the hint keeps the raw literal; substitution happens at resolution
    assert_eq!(
        result.reports[0].dependencies[0].path,
        DependencyPath::Literal("foo".to_string())
    );
    assert_eq!(
        result.reports[0].path_aliases.get("foo"),
        Some(&"/lib/foo.js".to_string())
    );
}

/// Aliases belong to the module that declared them and never leak into
/// sibling modules or later analyses.
#[test]
fn aliases_do_not_leak_across_modules() {
    let configured = program(vec![alias_config_stmt(), require_stmt("foo")]);
    let unconfigured = program(vec![require_stmt("foo"), string_stmt("m")]);
    let modules = vec![
        module(&configured, "/app.js"),
        module(&unconfigured, "/other.js"),
        requiring_module("/lib/foo.js", &[]),
    ];
    let result = analyse_defaults(&modules);

    assert_eq!(result.adjacency_matrix[0][2], 1);
    assert_eq!(result.adjacency_matrix[1][2], 0);
    assert!(result.reports[1].path_aliases.is_empty());
}
