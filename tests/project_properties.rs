//! Property-based tests for the project pipeline. Invariants that should
//! hold for all inputs:
//! - Deferred processing is observationally equivalent to direct analysis
//! - Matrices are always square and sized to the module count
//! - Density and change cost stay inside their percentage bounds
//! - Visibility is a superset of adjacency plus the reflexive diagonal
//! - Analysis is deterministic

mod common;

use common::requiring_module;
use complexmap::ast::estree::{EstreeAdapter, Node};
use complexmap::{
    analyse, analyse_modules, process_results, ProjectOptions, Settings, SourceModule,
};
use proptest::prelude::*;

const MODULE_COUNT: usize = 5;

/// Build a module set over fixed paths whose requires realize the given
/// edge list through exact absolute-path resolution.
fn modules_with_edges(edges: &[(usize, usize)]) -> Vec<SourceModule<Node>> {
    (0..MODULE_COUNT)
        .map(|i| {
            let requires: Vec<String> = edges
                .iter()
                .filter(|(from, _)| *from == i)
                .map(|(_, to)| format!("/m{to}.js"))
                .collect();
            let refs: Vec<&str> = requires.iter().map(String::as_str).collect();
            requiring_module(&format!("/m{i}.js"), &refs)
        })
        .collect()
}

fn edge_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec((0..MODULE_COUNT, 0..MODULE_COUNT), 0..12)
}

proptest! {
    #[test]
    fn deferred_processing_is_equivalent(edges in edge_strategy(), no_core_size in any::<bool>()) {
        let modules = modules_with_edges(&edges);
        let options = ProjectOptions { no_core_size };

        let direct = analyse(&modules, &EstreeAdapter, &Settings::default(), &options)
            .expect("analysis succeeds");
        let raw = analyse_modules(&modules, &EstreeAdapter, &Settings::default())
            .expect("walk succeeds");
        let deferred = process_results(raw, &options);

        prop_assert_eq!(direct, deferred);
    }

    #[test]
    fn matrices_are_square_and_sized_to_module_count(edges in edge_strategy()) {
        let modules = modules_with_edges(&edges);
        let result = analyse(
            &modules,
            &EstreeAdapter,
            &Settings::default(),
            &ProjectOptions::default(),
        )
        .expect("analysis succeeds");

        prop_assert_eq!(result.adjacency_matrix.len(), MODULE_COUNT);
        for row in &result.adjacency_matrix {
            prop_assert_eq!(row.len(), MODULE_COUNT);
        }
        let visibility = result.visibility_matrix.expect("computed");
        prop_assert_eq!(visibility.len(), MODULE_COUNT);
        for row in &visibility {
            prop_assert_eq!(row.len(), MODULE_COUNT);
        }
    }

    #[test]
    fn scalar_structure_metrics_stay_in_bounds(edges in edge_strategy()) {
        let modules = modules_with_edges(&edges);
        let result = analyse(
            &modules,
            &EstreeAdapter,
            &Settings::default(),
            &ProjectOptions::default(),
        )
        .expect("analysis succeeds");

        prop_assert!(result.first_order_density >= 0.0);
        prop_assert!(result.first_order_density <= 100.0);

        let change_cost = result.change_cost.expect("computed");
        // at minimum every module can reach itself
        prop_assert!(change_cost >= 100.0 / MODULE_COUNT as f64 - 1e-9);
        prop_assert!(change_cost <= 100.0);

        let core_size = result.core_size.expect("computed");
        prop_assert!(core_size <= MODULE_COUNT);
        prop_assert_ne!(core_size, 1);
    }

    #[test]
    fn visibility_contains_adjacency_and_diagonal(edges in edge_strategy()) {
        let modules = modules_with_edges(&edges);
        let result = analyse(
            &modules,
            &EstreeAdapter,
            &Settings::default(),
            &ProjectOptions::default(),
        )
        .expect("analysis succeeds");

        let adjacency = &result.adjacency_matrix;
        let visibility = result.visibility_matrix.expect("computed");
        for i in 0..MODULE_COUNT {
            prop_assert_eq!(visibility[i][i], 1);
            for j in 0..MODULE_COUNT {
                prop_assert!(visibility[i][j] >= adjacency[i][j]);
            }
        }
    }

    #[test]
    fn analysis_is_deterministic(edges in edge_strategy()) {
        let modules = modules_with_edges(&edges);
        let options = ProjectOptions::default();
        let first = analyse(&modules, &EstreeAdapter, &Settings::default(), &options)
            .expect("analysis succeeds");
        let second = analyse(&modules, &EstreeAdapter, &Settings::default(), &options)
            .expect("analysis succeeds");
        prop_assert_eq!(first, second);
    }
}
