//! Rules for the base statement and expression constructs.

use super::{
    bool_attr, child_kind_is, first_child, has_child, literal_token, name_of, safe_name, str_attr,
    ChildPolicy, Count, ScopeRule, SyntaxRule, TokenRule,
};
use crate::ast::AstAdapter;
use crate::core::{DependencyHint, DependencyKind, DependencyPath, Settings};
use crate::walker::WalkContext;

pub(super) fn array_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("[]")],
        operands: vec![TokenRule::PerNode(|a, n, _| Some(safe_name(name_of(a, n))))],
        children: ChildPolicy::Fields(&["elements"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn assignment_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::PerNode(|a, n, _| str_attr(a, n, "operator"))],
        children: ChildPolicy::Fields(&["left", "right"]),
        assignable_name: Some(assignment_target_name),
        ..SyntaxRule::null()
    }
}

fn assignment_target_name<A: AstAdapter>(adapter: &A, node: &A::Node) -> Option<String> {
    let left = first_child(adapter, node, "left")?;
    if adapter.kind(left) == "MemberExpression" {
        let object = first_child(adapter, left, "object").and_then(|o| name_of(adapter, o));
        let property = first_child(adapter, left, "property").and_then(|p| name_of(adapter, p));
        Some(format!("{}.{}", safe_name(object), safe_name(property)))
    } else {
        name_of(adapter, left)
    }
}

pub(super) fn binary_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::PerNode(|a, n, _| str_attr(a, n, "operator"))],
        children: ChildPolicy::Fields(&["left", "right"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn block_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        children: ChildPolicy::Fields(&["body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn break_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("break")],
        children: ChildPolicy::Fields(&["label"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn call_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        // An immediately-invoked function expression reads as a statement
        lloc: Count::PerNode(|a, n, _| {
            u32::from(child_kind_is(a, n, "callee", "FunctionExpression"))
        }),
        operators: vec![TokenRule::Fixed("()")],
        children: ChildPolicy::Fields(&["arguments", "callee"]),
        dependencies: Some(call_dependencies),
        ..SyntaxRule::null()
    }
}

fn call_dependencies<A: AstAdapter>(
    adapter: &A,
    node: &A::Node,
    context: &mut WalkContext,
) -> Vec<DependencyHint> {
    let Some(callee) = first_child(adapter, node, "callee") else {
        return Vec::new();
    };

    if adapter.kind(callee) == "Identifier"
        && name_of(adapter, callee).as_deref() == Some("require")
    {
        return require_hints(adapter, node);
    }

    if is_require_config(adapter, callee) {
        collect_path_aliases(adapter, node, context);
    }
    Vec::new()
}

fn require_hints<A: AstAdapter>(adapter: &A, node: &A::Node) -> Vec<DependencyHint> {
    let line = adapter.span(node).0;
    let arguments = adapter.children(node, "arguments");

    match arguments.len() {
        1 => vec![DependencyHint {
            line,
            kind: DependencyKind::CommonJs,
            path: literal_path(adapter, arguments[0]),
        }],
        2 => {
            if adapter.kind(arguments[0]) == "ArrayExpression" {
                adapter
                    .children(arguments[0], "elements")
                    .into_iter()
                    .map(|element| DependencyHint {
                        line,
                        kind: DependencyKind::Amd,
                        path: literal_path(adapter, element),
                    })
                    .collect()
            } else {
                vec![DependencyHint {
                    line,
                    kind: DependencyKind::Amd,
                    path: literal_path(adapter, arguments[0]),
                }]
            }
        }
        _ => Vec::new(),
    }
}

fn literal_path<A: AstAdapter>(adapter: &A, node: &A::Node) -> DependencyPath {
    if adapter.kind(node) == "Literal" {
        if let Some(path) = str_attr(adapter, node, "value") {
            return DependencyPath::Literal(path);
        }
    }
    DependencyPath::Dynamic
}

fn is_require_config<A: AstAdapter>(adapter: &A, callee: &A::Node) -> bool {
    adapter.kind(callee) == "MemberExpression"
        && first_child(adapter, callee, "object").is_some_and(|object| {
            adapter.kind(object) == "Identifier"
                && name_of(adapter, object).as_deref() == Some("require")
        })
        && first_child(adapter, callee, "property").is_some_and(|property| {
            adapter.kind(property) == "Identifier"
                && name_of(adapter, property).as_deref() == Some("config")
        })
}

fn collect_path_aliases<A: AstAdapter>(adapter: &A, node: &A::Node, context: &mut WalkContext) {
    let arguments = adapter.children(node, "arguments");
    if arguments.len() != 1 {
        return;
    }
    let config = arguments[0];
    if adapter.kind(config) != "ObjectExpression" {
        return;
    }
    for property in adapter.children(config, "properties") {
        let is_paths = first_child(adapter, property, "key")
            .is_some_and(|key| name_of(adapter, key).as_deref() == Some("paths"));
        let Some(value) = first_child(adapter, property, "value") else {
            continue;
        };
        if !is_paths || adapter.kind(value) != "ObjectExpression" {
            continue;
        }
        for alias in adapter.children(value, "properties") {
            let key = first_child(adapter, alias, "key")
                .filter(|key| adapter.kind(key) == "Identifier")
                .and_then(|key| name_of(adapter, key));
            let target = first_child(adapter, alias, "value")
                .filter(|value| adapter.kind(value) == "Literal")
                .and_then(|value| str_attr(adapter, value, "value"));
            if let (Some(key), Some(target)) = (key, target) {
                context.path_aliases.insert(key, target);
            }
        }
    }
}

pub(super) fn catch_clause<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        cyclomatic: Count::PerNode(|_, _, settings| u32::from(settings.trycatch)),
        operators: vec![TokenRule::Fixed("catch")],
        children: ChildPolicy::Fields(&["param", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn conditional_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        cyclomatic: Count::Fixed(1),
        operators: vec![TokenRule::Fixed(":?")],
        children: ChildPolicy::Fields(&["test", "consequent", "alternate"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn continue_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("continue")],
        children: ChildPolicy::Fields(&["label"]),
        ..SyntaxRule::null()
    }
}

/// Debugger, empty and labeled statements contribute nothing and are not
/// recursed into.
pub(super) fn inert<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        children: ChildPolicy::Fields(&[]),
        ..SyntaxRule::null()
    }
}

pub(super) fn do_while_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(2),
        cyclomatic: Count::PerNode(|a, n, _| u32::from(has_child(a, n, "test"))),
        operators: vec![TokenRule::Fixed("dowhile")],
        children: ChildPolicy::Fields(&["test", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn expression_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        children: ChildPolicy::Fields(&["expression"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn for_in_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        cyclomatic: Count::PerNode(|_, _, settings| u32::from(settings.forin)),
        operators: vec![TokenRule::Fixed("forin")],
        children: ChildPolicy::Fields(&["left", "right", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn for_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        cyclomatic: Count::PerNode(|a, n, _| u32::from(has_child(a, n, "test"))),
        operators: vec![TokenRule::Fixed("for")],
        children: ChildPolicy::Fields(&["init", "test", "update", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn function_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![
            TokenRule::Fixed("function"),
            TokenRule::PerNode(|a, n, _| {
                bool_attr(a, n, "generator").then(|| "generator".to_string())
            }),
            TokenRule::PerNode(|a, n, _| {
                bool_attr(a, n, "async").then(|| "async".to_string())
            }),
        ],
        operands: vec![TokenRule::PerNode(|a, n, _| {
            Some(safe_name(declared_name(a, n)))
        })],
        children: ChildPolicy::Fields(&["params", "body"]),
        scope: ScopeRule::Function,
        scope_name: Some(declared_name),
        ..SyntaxRule::null()
    }
}

pub(super) fn function_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("function")],
        operands: vec![TokenRule::PerNode(|a, n, _| {
            Some(safe_name(declared_name(a, n)))
        })],
        children: ChildPolicy::Fields(&["params", "body"]),
        scope: ScopeRule::Function,
        scope_name: Some(declared_name),
        ..SyntaxRule::null()
    }
}

fn declared_name<A: AstAdapter>(adapter: &A, node: &A::Node) -> Option<String> {
    first_child(adapter, node, "id").and_then(|id| name_of(adapter, id))
}

pub(super) fn identifier<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operands: vec![TokenRule::PerNode(|a, n, _| name_of(a, n))],
        ..SyntaxRule::null()
    }
}

pub(super) fn if_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::PerNode(|a, n, _| if has_child(a, n, "alternate") { 2 } else { 1 }),
        cyclomatic: Count::Fixed(1),
        operators: vec![
            TokenRule::Fixed("if"),
            TokenRule::PerNode(|a, n, _| {
                has_child(a, n, "alternate").then(|| "else".to_string())
            }),
        ],
        children: ChildPolicy::Fields(&["test", "consequent", "alternate"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn literal<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operands: vec![TokenRule::PerNode(|a, n, _| Some(literal_token(a, n)))],
        ..SyntaxRule::null()
    }
}

pub(super) fn logical_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        cyclomatic: Count::PerNode(|a, n, settings| {
            let operator = str_attr(a, n, "operator");
            let counts = match operator.as_deref() {
                Some("&&") => true,
                Some("||") => settings.logicalor,
                _ => false,
            };
            u32::from(counts)
        }),
        operators: vec![TokenRule::PerNode(|a, n, _| str_attr(a, n, "operator"))],
        children: ChildPolicy::Fields(&["left", "right"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn member_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        // Member access on a literal receiver reads as its own statement
        lloc: Count::PerNode(|a, n, _| {
            let literal_receiver = first_child(a, n, "object").is_some_and(|object| {
                matches!(
                    a.kind(object),
                    "ObjectExpression" | "ArrayExpression" | "FunctionExpression"
                )
            });
            u32::from(literal_receiver)
        }),
        operators: vec![TokenRule::Fixed(".")],
        children: ChildPolicy::Fields(&["object", "property"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn new_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::PerNode(|a, n, _| {
            u32::from(child_kind_is(a, n, "callee", "FunctionExpression"))
        }),
        operators: vec![TokenRule::Fixed("new")],
        children: ChildPolicy::Fields(&["arguments", "callee"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn object_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("{}")],
        operands: vec![TokenRule::PerNode(|a, n, _| Some(safe_name(name_of(a, n))))],
        children: ChildPolicy::Fields(&["properties"]),
        ..SyntaxRule::null()
    }
}

/// Shorthand properties contribute no logical line and no `:` operator;
/// only the longhand form carries both.
pub(super) fn property<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::PerNode(|a, n, _| u32::from(!bool_attr(a, n, "shorthand"))),
        operators: vec![TokenRule::PerNode(|a, n, _| {
            (!bool_attr(a, n, "shorthand")).then(|| ":".to_string())
        })],
        children: ChildPolicy::Fields(&["key", "value"]),
        assignable_name: Some(|a, n| first_child(a, n, "key").and_then(|key| name_of(a, key))),
        ..SyntaxRule::null()
    }
}

pub(super) fn return_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("return")],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn sequence_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        children: ChildPolicy::Fields(&["expressions"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn switch_case<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        cyclomatic: Count::PerNode(|a, n, settings| {
            u32::from(settings.switchcase && has_child(a, n, "test"))
        }),
        operators: vec![TokenRule::PerNode(|a, n, _| {
            Some(if has_child(a, n, "test") { "case" } else { "default" }.to_string())
        })],
        children: ChildPolicy::Fields(&["test", "consequent"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn switch_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("switch")],
        children: ChildPolicy::Fields(&["discriminant", "cases"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn this_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operands: vec![TokenRule::Fixed("this")],
        ..SyntaxRule::null()
    }
}

pub(super) fn throw_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("throw")],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn try_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        children: ChildPolicy::Fields(&["block", "handler"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn unary_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::PerNode(fixity_operator)],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn update_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::PerNode(fixity_operator)],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

/// `++` before and after an operand are different operators to Halstead
fn fixity_operator<A: AstAdapter>(
    adapter: &A,
    node: &A::Node,
    _settings: &Settings,
) -> Option<String> {
    let operator = str_attr(adapter, node, "operator")?;
    let fixity = if bool_attr(adapter, node, "prefix") {
        "pre"
    } else {
        "post"
    };
    Some(format!("{operator} ({fixity}fix)"))
}

pub(super) fn variable_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::PerNode(|a, n, _| str_attr(a, n, "kind"))],
        children: ChildPolicy::Fields(&["declarations"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn variable_declarator<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::PerNode(|a, n, _| {
            has_child(a, n, "init").then(|| "=".to_string())
        })],
        children: ChildPolicy::Fields(&["id", "init"]),
        assignable_name: Some(|a, n| first_child(a, n, "id").and_then(|id| name_of(a, id))),
        ..SyntaxRule::null()
    }
}

pub(super) fn while_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        cyclomatic: Count::PerNode(|a, n, _| u32::from(has_child(a, n, "test"))),
        operators: vec![TokenRule::Fixed("while")],
        children: ChildPolicy::Fields(&["test", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn with_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("with")],
        children: ChildPolicy::Fields(&["object", "body"]),
        ..SyntaxRule::null()
    }
}
