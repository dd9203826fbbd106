//! Rules for module, class, arrow, destructuring and async constructs.

use super::{
    bool_attr, first_child, name_of, safe_name, str_attr, ChildPolicy, Count, ScopeRule,
    SyntaxRule, TokenRule,
};
use crate::ast::AstAdapter;
use crate::core::{DependencyHint, DependencyKind, DependencyPath};
use crate::walker::WalkContext;

pub(super) fn array_pattern<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("[]")],
        children: ChildPolicy::Fields(&["elements"]),
        ..SyntaxRule::null()
    }
}

/// Arrows with a block body open a new scope; expression-bodied arrows are
/// counted in place.
pub(super) fn arrow_function_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("=>")],
        children: ChildPolicy::Fields(&["params", "body"]),
        scope: ScopeRule::PerNode(|a, n| !bool_attr(a, n, "expression")),
        ..SyntaxRule::null()
    }
}

pub(super) fn assignment_pattern<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("=")],
        children: ChildPolicy::Fields(&["left", "right"]),
        assignable_name: Some(|a, n| first_child(a, n, "left").and_then(|left| name_of(a, left))),
        ..SyntaxRule::null()
    }
}

pub(super) fn await_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("await")],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn class_body<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        children: ChildPolicy::Fields(&["body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn class_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("class")],
        operands: vec![TokenRule::PerNode(|a, n, _| {
            Some(safe_name(
                first_child(a, n, "id").and_then(|id| name_of(a, id)),
            ))
        })],
        children: ChildPolicy::Fields(&["superClass", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn export_all_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("export")],
        children: ChildPolicy::Fields(&["source"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn export_default_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("export")],
        children: ChildPolicy::Fields(&["declaration"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn export_named_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("export")],
        children: ChildPolicy::Fields(&["declaration", "specifiers", "source"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn for_of_statement<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        cyclomatic: Count::PerNode(|_, _, settings| u32::from(settings.forof)),
        operators: vec![TokenRule::Fixed("forof")],
        children: ChildPolicy::Fields(&["left", "right", "body"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn import_declaration<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        lloc: Count::Fixed(1),
        operators: vec![TokenRule::Fixed("import")],
        children: ChildPolicy::Fields(&["specifiers", "source"]),
        dependencies: Some(import_dependency),
        ..SyntaxRule::null()
    }
}

fn import_dependency<A: AstAdapter>(
    adapter: &A,
    node: &A::Node,
    _context: &mut WalkContext,
) -> Vec<DependencyHint> {
    let Some(source) = first_child(adapter, node, "source") else {
        return Vec::new();
    };
    let Some(path) = str_attr(adapter, source, "value") else {
        return Vec::new();
    };
    vec![DependencyHint {
        line: adapter.span(node).0,
        kind: DependencyKind::Esm,
        path: DependencyPath::Literal(path),
    }]
}

pub(super) fn method_definition<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::PerNode(|a, n, _| {
            bool_attr(a, n, "static").then(|| "static".to_string())
        })],
        children: ChildPolicy::Fields(&["value"]),
        method_name: Some(|a, n| first_child(a, n, "key").and_then(|key| name_of(a, key))),
        ..SyntaxRule::null()
    }
}

pub(super) fn object_pattern<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("{}")],
        children: ChildPolicy::Fields(&["properties"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn rest_element<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("rest")],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn spread_element<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("spread")],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn tagged_template_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("tag")],
        children: ChildPolicy::Fields(&["quasi"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn template_literal<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("``")],
        children: ChildPolicy::Fields(&["expressions"]),
        ..SyntaxRule::null()
    }
}

pub(super) fn yield_expression<A: AstAdapter>() -> SyntaxRule<A> {
    SyntaxRule {
        operators: vec![TokenRule::Fixed("yield")],
        children: ChildPolicy::Fields(&["argument"]),
        ..SyntaxRule::null()
    }
}
