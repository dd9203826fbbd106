//! Declarative per-construct rule table. Each syntactic construct maps to an
//! immutable [`SyntaxRule`] describing its logical-line and cyclomatic
//! contributions, the Halstead tokens it registers, which child fields the
//! walker recurses into, whether it opens a function scope, and any
//! dependency information it yields. Rules are pure functions of
//! `(node, settings)`; evaluating one twice on the same inputs is
//! side-effect-free and idempotent.

mod common;
mod modern;

use crate::ast::{AstAdapter, Attr};
use crate::core::{DependencyHint, Settings, ANONYMOUS};
use crate::walker::WalkContext;

/// A metric contribution: a constant, or a function of the node and the
/// active settings.
pub enum Count<A: AstAdapter> {
    Fixed(u32),
    PerNode(fn(&A, &A::Node, &Settings) -> u32),
}

impl<A: AstAdapter> Count<A> {
    pub fn eval(&self, adapter: &A, node: &A::Node, settings: &Settings) -> u32 {
        match self {
            Count::Fixed(n) => *n,
            Count::PerNode(f) => f(adapter, node, settings),
        }
    }
}

/// One operator or operand token a construct registers: fixed, or derived
/// from the node (returning `None` to register nothing).
pub enum TokenRule<A: AstAdapter> {
    Fixed(&'static str),
    PerNode(fn(&A, &A::Node, &Settings) -> Option<String>),
}

impl<A: AstAdapter> TokenRule<A> {
    pub fn eval(&self, adapter: &A, node: &A::Node, settings: &Settings) -> Option<String> {
        match self {
            TokenRule::Fixed(token) => Some((*token).to_string()),
            TokenRule::PerNode(f) => f(adapter, node, settings),
        }
    }
}

/// Which child fields the walker recurses into
pub enum ChildPolicy {
    Fields(&'static [&'static str]),
    /// Generic fallback: visit every field present on the node, so
    /// unrecognized constructs never halt analysis.
    All,
}

/// Whether a construct opens a new function scope
pub enum ScopeRule<A: AstAdapter> {
    None,
    Function,
    PerNode(fn(&A, &A::Node) -> bool),
}

impl<A: AstAdapter> ScopeRule<A> {
    pub fn opens(&self, adapter: &A, node: &A::Node) -> bool {
        match self {
            ScopeRule::None => false,
            ScopeRule::Function => true,
            ScopeRule::PerNode(f) => f(adapter, node),
        }
    }
}

pub type DependencyFn<A> =
    fn(&A, &<A as AstAdapter>::Node, &mut WalkContext) -> Vec<DependencyHint>;
pub type NameFn<A> = fn(&A, &<A as AstAdapter>::Node) -> Option<String>;

/// Everything the walker needs to know about one construct kind
pub struct SyntaxRule<A: AstAdapter> {
    pub lloc: Count<A>,
    pub cyclomatic: Count<A>,
    pub operators: Vec<TokenRule<A>>,
    pub operands: Vec<TokenRule<A>>,
    pub children: ChildPolicy,
    pub scope: ScopeRule<A>,
    /// Best-effort name for the scope this construct opens
    pub scope_name: Option<NameFn<A>>,
    pub dependencies: Option<DependencyFn<A>>,
    /// Labels the assignment target so anonymous functions assigned to
    /// variables or members pick up a readable name
    pub assignable_name: Option<NameFn<A>>,
    /// Labels the method a nested function expression implements
    pub method_name: Option<NameFn<A>>,
}

impl<A: AstAdapter> SyntaxRule<A> {
    /// Zero-contribution rule with the generic child walk; the mapping for
    /// every kind the table does not recognize.
    pub fn null() -> Self {
        Self {
            lloc: Count::Fixed(0),
            cyclomatic: Count::Fixed(0),
            operators: Vec::new(),
            operands: Vec::new(),
            children: ChildPolicy::All,
            scope: ScopeRule::None,
            scope_name: None,
            dependencies: None,
            assignable_name: None,
            method_name: None,
        }
    }
}

/// Look up the rule for a construct kind. Unknown kinds map to the null
/// rule, contributing zero to every metric.
pub fn lookup<A: AstAdapter>(kind: &str) -> SyntaxRule<A> {
    match kind {
        "ArrayExpression" => common::array_expression(),
        "AssignmentExpression" => common::assignment_expression(),
        "BinaryExpression" => common::binary_expression(),
        "BlockStatement" => common::block_statement(),
        "BreakStatement" => common::break_statement(),
        "CallExpression" => common::call_expression(),
        "CatchClause" => common::catch_clause(),
        "ConditionalExpression" => common::conditional_expression(),
        "ContinueStatement" => common::continue_statement(),
        "DebuggerStatement" | "EmptyStatement" | "LabeledStatement" => common::inert(),
        "DoWhileStatement" => common::do_while_statement(),
        "ExpressionStatement" => common::expression_statement(),
        "ForInStatement" => common::for_in_statement(),
        "ForStatement" => common::for_statement(),
        "FunctionDeclaration" => common::function_declaration(),
        "FunctionExpression" => common::function_expression(),
        "Identifier" => common::identifier(),
        "IfStatement" => common::if_statement(),
        "Literal" => common::literal(),
        "LogicalExpression" => common::logical_expression(),
        "MemberExpression" => common::member_expression(),
        "NewExpression" => common::new_expression(),
        "ObjectExpression" => common::object_expression(),
        "Property" => common::property(),
        "ReturnStatement" => common::return_statement(),
        "SequenceExpression" => common::sequence_expression(),
        "SwitchCase" => common::switch_case(),
        "SwitchStatement" => common::switch_statement(),
        "ThisExpression" => common::this_expression(),
        "ThrowStatement" => common::throw_statement(),
        "TryStatement" => common::try_statement(),
        "UnaryExpression" => common::unary_expression(),
        "UpdateExpression" => common::update_expression(),
        "VariableDeclaration" => common::variable_declaration(),
        "VariableDeclarator" => common::variable_declarator(),
        "WhileStatement" => common::while_statement(),
        "WithStatement" => common::with_statement(),

        "ArrayPattern" => modern::array_pattern(),
        "ArrowFunctionExpression" => modern::arrow_function_expression(),
        "AssignmentPattern" => modern::assignment_pattern(),
        "AwaitExpression" => modern::await_expression(),
        "ClassBody" => modern::class_body(),
        "ClassDeclaration" => modern::class_declaration(),
        "ExportAllDeclaration" => modern::export_all_declaration(),
        "ExportDefaultDeclaration" => modern::export_default_declaration(),
        "ExportNamedDeclaration" => modern::export_named_declaration(),
        "ForOfStatement" => modern::for_of_statement(),
        "ImportDeclaration" => modern::import_declaration(),
        "MethodDefinition" => modern::method_definition(),
        "ObjectPattern" => modern::object_pattern(),
        "RestElement" => modern::rest_element(),
        "SpreadElement" => modern::spread_element(),
        "TaggedTemplateExpression" => modern::tagged_template_expression(),
        "TemplateLiteral" => modern::template_literal(),
        "YieldExpression" => modern::yield_expression(),

        _ => SyntaxRule::null(),
    }
}

// Shared node-inspection helpers for rule bodies.

pub(crate) fn first_child<'n, A: AstAdapter>(
    adapter: &A,
    node: &'n A::Node,
    field: &str,
) -> Option<&'n A::Node> {
    adapter.children(node, field).into_iter().next()
}

pub(crate) fn has_child<A: AstAdapter>(adapter: &A, node: &A::Node, field: &str) -> bool {
    !adapter.children(node, field).is_empty()
}

pub(crate) fn child_kind_is<A: AstAdapter>(
    adapter: &A,
    node: &A::Node,
    field: &str,
    kind: &str,
) -> bool {
    first_child(adapter, node, field).is_some_and(|child| adapter.kind(child) == kind)
}

pub(crate) fn str_attr<A: AstAdapter>(adapter: &A, node: &A::Node, name: &str) -> Option<String> {
    match adapter.attr(node, name) {
        Some(Attr::Str(s)) => Some(s),
        _ => None,
    }
}

pub(crate) fn bool_attr<A: AstAdapter>(adapter: &A, node: &A::Node, name: &str) -> bool {
    adapter.attr(node, name).is_some_and(|a| a.is_true())
}

pub(crate) fn name_of<A: AstAdapter>(adapter: &A, node: &A::Node) -> Option<String> {
    str_attr(adapter, node, "name")
}

pub(crate) fn safe_name(name: Option<String>) -> String {
    name.unwrap_or_else(|| ANONYMOUS.to_string())
}

/// Render a literal as a Halstead operand: strings keep their quotes so
/// `"foo"` and a variable named `foo` stay distinct identifiers.
pub(crate) fn literal_token<A: AstAdapter>(adapter: &A, node: &A::Node) -> String {
    match adapter.attr(node, "value") {
        Some(Attr::Str(s)) => format!("\"{s}\""),
        Some(Attr::Bool(b)) => b.to_string(),
        Some(Attr::Num(n)) => format_number(n),
        None => str_attr(adapter, node, "raw").unwrap_or_else(|| "null".to_string()),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
