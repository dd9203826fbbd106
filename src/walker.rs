//! Scope-tree builder: a depth-first pre-order walk of one module's tree,
//! driven by the syntax rule table. Scopes live in an arena addressed by
//! index; creation order is source order, which fixes the order of function
//! reports. Every ancestor scope's tallies are the sum of its own direct
//! contributions and all descendant scopes', so the root aggregate always
//! equals the whole file.

use indexmap::IndexMap;
use log::debug;

use crate::ast::AstAdapter;
use crate::core::metrics;
use crate::core::{
    DependencyHint, FunctionReport, HalsteadCounts, ModuleReport, ScopeMetrics, Settings, Sloc,
    SourceModule, ANONYMOUS,
};
use crate::syntax::{self, ChildPolicy, SyntaxRule};

/// State scoped to a single module's walk. Nothing here outlives the walk
/// except what is copied into the report, so concurrent analyses never
/// share mutable state.
#[derive(Debug, Default)]
pub struct WalkContext {
    /// AMD path aliases declared by this module (`require.config` paths)
    pub path_aliases: IndexMap<String, String>,
}

/// Raw per-scope tallies accumulated during the walk
#[derive(Clone, Debug, Default)]
struct Tally {
    operators: IndexMap<String, u32>,
    operands: IndexMap<String, u32>,
    lloc: u32,
    branches: u32,
    params: usize,
}

impl Tally {
    fn merge(&mut self, other: &Tally) {
        for (identifier, count) in &other.operators {
            *self.operators.entry(identifier.clone()).or_insert(0) += count;
        }
        for (identifier, count) in &other.operands {
            *self.operands.entry(identifier.clone()).or_insert(0) += count;
        }
        self.lloc += other.lloc;
        self.branches += other.branches;
        self.params += other.params;
    }
}

/// One scope in the arena. Index 0 is always the module root; every other
/// record is a function scope pointing back at its parent.
#[derive(Debug)]
struct ScopeRecord {
    name: String,
    span: (usize, usize),
    parent: Option<usize>,
    tally: Tally,
}

struct ModuleWalker<'a, A: AstAdapter> {
    adapter: &'a A,
    settings: &'a Settings,
    arena: Vec<ScopeRecord>,
    current: usize,
    dependencies: Vec<DependencyHint>,
    context: WalkContext,
    pending_name: Option<String>,
}

impl<'a, A: AstAdapter> ModuleWalker<'a, A> {
    fn visit(&mut self, node: &A::Node) {
        let adapter = self.adapter;
        let settings = self.settings;
        let rule = syntax::lookup::<A>(adapter.kind(node));

        let tally = &mut self.arena[self.current].tally;
        tally.lloc += rule.lloc.eval(adapter, node, settings);
        tally.branches += rule.cyclomatic.eval(adapter, node, settings);
        for token in &rule.operators {
            if let Some(identifier) = token.eval(adapter, node, settings) {
                *tally.operators.entry(identifier).or_insert(0) += 1;
            }
        }
        for token in &rule.operands {
            if let Some(identifier) = token.eval(adapter, node, settings) {
                *tally.operands.entry(identifier).or_insert(0) += 1;
            }
        }

        // Dependencies are a whole-module concern: hints surface to the
        // module root no matter how deeply they were found.
        if let Some(extract) = rule.dependencies {
            let hints = extract(adapter, node, &mut self.context);
            self.dependencies.extend(hints);
        }

        if let Some(label) = rule.method_name.or(rule.assignable_name) {
            if let Some(name) = label(adapter, node) {
                self.pending_name = Some(name);
            }
        }

        if rule.scope.opens(adapter, node) {
            let name = rule
                .scope_name
                .and_then(|f| f(adapter, node))
                .or_else(|| self.pending_name.take())
                .unwrap_or_else(|| ANONYMOUS.to_string());
            let parent = self.current;
            self.arena.push(ScopeRecord {
                name,
                span: adapter.span(node),
                parent: Some(parent),
                tally: Tally {
                    params: adapter.children(node, "params").len(),
                    ..Tally::default()
                },
            });
            self.current = self.arena.len() - 1;
            self.walk_children(node, &rule);
            self.current = parent;
        } else {
            self.walk_children(node, &rule);
        }
    }

    fn walk_children(&mut self, node: &A::Node, rule: &SyntaxRule<A>) {
        let adapter = self.adapter;
        match rule.children {
            ChildPolicy::Fields(fields) => {
                for field in fields {
                    for child in adapter.children(node, field) {
                        self.visit(child);
                    }
                }
            }
            ChildPolicy::All => {
                for field in adapter.field_names(node) {
                    for child in adapter.children(node, field) {
                        self.visit(child);
                    }
                }
            }
        }
    }
}

/// Walk one module's tree and assemble its full report.
pub fn walk_module<A: AstAdapter>(
    module: &SourceModule<A::Node>,
    adapter: &A,
    settings: &Settings,
) -> ModuleReport {
    debug!("walking module {}", module.path);
    let root = ScopeRecord {
        name: module.path.clone(),
        span: adapter.span(&module.tree),
        parent: None,
        tally: Tally::default(),
    };
    let mut walker = ModuleWalker {
        adapter,
        settings,
        arena: vec![root],
        current: 0,
        dependencies: Vec::new(),
        context: WalkContext::default(),
        pending_name: None,
    };
    walker.visit(&module.tree);

    let ModuleWalker {
        arena,
        dependencies,
        context,
        ..
    } = walker;
    let totals = aggregate_totals(&arena);

    let aggregate = scope_metrics(&arena[0], &totals[0]);
    let functions: Vec<FunctionReport> = arena
        .iter()
        .zip(&totals)
        .skip(1)
        .map(|(record, total)| FunctionReport {
            name: record.name.clone(),
            line: record.span.0,
            metrics: scope_metrics(record, total),
        })
        .collect();

    let (loc, cyclomatic, effort, params) = function_means(&aggregate, &functions);
    let maintainability =
        metrics::maintainability_index(effort, cyclomatic, loc, module.comment_percent);

    ModuleReport {
        path: module.path.clone(),
        aggregate,
        functions,
        dependencies,
        path_aliases: context.path_aliases,
        loc,
        cyclomatic,
        effort,
        params,
        maintainability,
    }
}

/// Fold each scope's tally into every ancestor. Children always have larger
/// arena indices than their parent, so one reverse pass finalizes deepest
/// scopes first.
fn aggregate_totals(arena: &[ScopeRecord]) -> Vec<Tally> {
    let mut totals: Vec<Tally> = arena.iter().map(|record| record.tally.clone()).collect();
    for index in (1..arena.len()).rev() {
        let Some(parent) = arena[index].parent else {
            continue;
        };
        let child = totals[index].clone();
        totals[parent].merge(&child);
    }
    totals
}

fn scope_metrics(record: &ScopeRecord, total: &Tally) -> ScopeMetrics {
    let (start, end) = record.span;
    let cyclomatic = 1 + total.branches;
    ScopeMetrics {
        sloc: Sloc {
            physical: end.saturating_sub(start) + 1,
            logical: total.lloc,
        },
        cyclomatic,
        cyclomatic_density: metrics::cyclomatic_density(cyclomatic, total.lloc),
        halstead: metrics::derive_halstead(counts_of(&total.operators), counts_of(&total.operands)),
        params: total.params,
    }
}

fn counts_of(tally: &IndexMap<String, u32>) -> HalsteadCounts {
    HalsteadCounts {
        total: tally.values().sum(),
        distinct: tally.len() as u32,
        identifiers: tally.keys().cloned().collect(),
    }
}

/// Per-function means for one module; a module with no functions falls back
/// to its aggregate as the single sample.
fn function_means(aggregate: &ScopeMetrics, functions: &[FunctionReport]) -> (f64, f64, f64, f64) {
    if functions.is_empty() {
        return (
            f64::from(aggregate.sloc.logical),
            f64::from(aggregate.cyclomatic),
            aggregate.halstead.effort,
            aggregate.params as f64,
        );
    }
    let count = functions.len();
    let sums = functions.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, f| {
        (
            acc.0 + f64::from(f.metrics.sloc.logical),
            acc.1 + f64::from(f.metrics.cyclomatic),
            acc.2 + f.metrics.halstead.effort,
            acc.3 + f.metrics.params as f64,
        )
    });
    (
        metrics::mean(sums.0, count),
        metrics::mean(sums.1, count),
        metrics::mean(sums.2, count),
        metrics::mean(sums.3, count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::estree::{EstreeAdapter, Node};
    use serde_json::json;

    fn module(value: serde_json::Value, path: &str) -> SourceModule<Node> {
        SourceModule::new(Node::from_value(&value).expect("valid tree"), path)
    }

    #[test]
    fn nested_function_tallies_bubble_into_ancestors() {
        // function outer() { function inner(a) { if (a) {} } }
        let tree = json!({
            "type": "Program",
            "body": [{
                "type": "FunctionDeclaration",
                "id": {"type": "Identifier", "name": "outer"},
                "params": [],
                "body": {"type": "BlockStatement", "body": [{
                    "type": "FunctionDeclaration",
                    "id": {"type": "Identifier", "name": "inner"},
                    "params": [{"type": "Identifier", "name": "a"}],
                    "body": {"type": "BlockStatement", "body": [{
                        "type": "IfStatement",
                        "test": {"type": "Identifier", "name": "a"},
                        "consequent": {"type": "BlockStatement", "body": []}
                    }]}
                }]}
            }]
        });
        let report = walk_module(&module(tree, "nested"), &EstreeAdapter, &Settings::default());

        assert_eq!(report.functions.len(), 2);
        let outer = &report.functions[0];
        let inner = &report.functions[1];
        assert_eq!(outer.name, "outer");
        assert_eq!(inner.name, "inner");

        // inner's if statement counts toward inner, outer and the aggregate
        assert_eq!(inner.metrics.cyclomatic, 2);
        assert_eq!(outer.metrics.cyclomatic, 2);
        assert_eq!(report.aggregate.cyclomatic, 2);

        // inner's declaration line lands in outer's scope, its body in its own
        assert_eq!(inner.metrics.sloc.logical, 1);
        assert_eq!(outer.metrics.sloc.logical, 2);
        assert_eq!(report.aggregate.sloc.logical, 3);

        // params roll up through the aggregate
        assert_eq!(inner.metrics.params, 1);
        assert_eq!(report.aggregate.params, 1);
    }

    #[test]
    fn anonymous_function_takes_assignment_target_name() {
        // var f = function () {};
        let tree = json!({
            "type": "Program",
            "body": [{
                "type": "VariableDeclaration",
                "kind": "var",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": {"type": "Identifier", "name": "f"},
                    "init": {
                        "type": "FunctionExpression",
                        "params": [],
                        "body": {"type": "BlockStatement", "body": []}
                    }
                }]
            }]
        });
        let report = walk_module(&module(tree, "named"), &EstreeAdapter, &Settings::default());
        assert_eq!(report.functions.len(), 1);
        assert_eq!(report.functions[0].name, "f");
    }

    #[test]
    fn unknown_constructs_walk_generically() {
        let tree = json!({
            "type": "MysteryStatement",
            "anything": [{"type": "Identifier", "name": "x"}]
        });
        let report = walk_module(&module(tree, "odd"), &EstreeAdapter, &Settings::default());
        assert_eq!(report.aggregate.sloc.logical, 0);
        assert_eq!(report.aggregate.halstead.operands.total, 1);
        assert_eq!(report.aggregate.halstead.operands.identifiers, vec!["x"]);
    }
}
