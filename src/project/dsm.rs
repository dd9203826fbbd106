//! Design-structure-matrix analysis over the resolved dependency edges:
//! adjacency and visibility matrices, first-order density, change cost and
//! circular-dependency core size, after MacCormack, Rusnak & Baldwin.

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use crate::core::Matrix;

/// The cross-module portion of a project report. `visibility`, `change_cost`
/// and `core_size` are `None` when their computation was skipped.
#[derive(Debug)]
pub(crate) struct ProjectStructure {
    pub adjacency: Matrix,
    pub first_order_density: f64,
    pub visibility: Option<Matrix>,
    pub change_cost: Option<f64>,
    pub core_size: Option<usize>,
}

pub(crate) fn analyse_structure(
    count: usize,
    edges: &[(usize, usize)],
    no_core_size: bool,
) -> ProjectStructure {
    let adjacency = adjacency_matrix(count, edges);
    let first_order_density = first_order_density(&adjacency, count);

    if no_core_size {
        return ProjectStructure {
            adjacency,
            first_order_density,
            visibility: None,
            change_cost: None,
            core_size: None,
        };
    }

    let visibility = visibility_matrix(&adjacency);
    let change_cost = change_cost(&visibility, count);
    let core_size = core_size(count, edges);
    ProjectStructure {
        adjacency,
        first_order_density,
        visibility: Some(visibility),
        change_cost: Some(change_cost),
        core_size: Some(core_size),
    }
}

fn adjacency_matrix(count: usize, edges: &[(usize, usize)]) -> Matrix {
    let mut matrix = vec![vec![0u8; count]; count];
    for &(from, to) in edges {
        if from != to {
            matrix[from][to] = 1;
        }
    }
    matrix
}

/// Fraction of possible directed edges present, as a percentage. Undefined
/// (zero) for fewer than two modules.
fn first_order_density(adjacency: &Matrix, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let ones = ones(adjacency);
    ones as f64 / (count * (count - 1)) as f64 * 100.0
}

/// Reflexive-transitive closure of the adjacency matrix (Warshall).
fn visibility_matrix(adjacency: &Matrix) -> Matrix {
    let count = adjacency.len();
    let mut visibility = adjacency.clone();
    for (i, row) in visibility.iter_mut().enumerate() {
        row[i] = 1;
    }
    for k in 0..count {
        for i in 0..count {
            if visibility[i][k] == 0 {
                continue;
            }
            for j in 0..count {
                if visibility[k][j] == 1 {
                    visibility[i][j] = 1;
                }
            }
        }
    }
    visibility
}

/// Fraction of module pairs a change might propagate between, diagonal
/// included: the average reach of one module through the visibility matrix.
fn change_cost(visibility: &Matrix, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    ones(visibility) as f64 / (count * count) as f64 * 100.0
}

/// Number of modules participating in any circular-dependency group: the
/// combined size of all strongly-connected components larger than one.
fn core_size(count: usize, edges: &[(usize, usize)]) -> usize {
    if count == 0 {
        return 0;
    }
    let mut graph = DiGraph::<usize, ()>::with_capacity(count, edges.len());
    let nodes: Vec<_> = (0..count).map(|i| graph.add_node(i)).collect();
    for &(from, to) in edges {
        graph.add_edge(nodes[from], nodes[to], ());
    }
    tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| component.len())
        .sum()
}

fn ones(matrix: &Matrix) -> usize {
    matrix
        .iter()
        .flat_map(|row| row.iter())
        .map(|&cell| cell as usize)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_is_all_degenerate() {
        let structure = analyse_structure(0, &[], false);
        assert!(structure.adjacency.is_empty());
        assert_eq!(structure.first_order_density, 0.0);
        assert_eq!(structure.change_cost, Some(0.0));
        assert_eq!(structure.core_size, Some(0));
    }

    #[test]
    fn single_module_short_circuits() {
        let structure = analyse_structure(1, &[], false);
        assert_eq!(structure.adjacency, vec![vec![0]]);
        assert_eq!(structure.first_order_density, 0.0);
        assert_eq!(structure.visibility, Some(vec![vec![1]]));
        assert_eq!(structure.change_cost, Some(100.0));
        assert_eq!(structure.core_size, Some(0));
    }

    #[test]
    fn independent_modules_have_identity_visibility() {
        let structure = analyse_structure(2, &[], false);
        assert_eq!(structure.first_order_density, 0.0);
        assert_eq!(structure.visibility, Some(vec![vec![1, 0], vec![0, 1]]));
        assert_eq!(structure.change_cost, Some(50.0));
        assert_eq!(structure.core_size, Some(0));
    }

    #[test]
    fn chain_closes_transitively() {
        // 0 -> 1 -> 2
        let structure = analyse_structure(3, &[(0, 1), (1, 2)], false);
        let visibility = structure.visibility.expect("computed");
        assert_eq!(visibility[0], vec![1, 1, 1]);
        assert_eq!(visibility[1], vec![0, 1, 1]);
        assert_eq!(visibility[2], vec![0, 0, 1]);
        assert_eq!(structure.core_size, Some(0));
    }

    #[test]
    fn cycle_forms_a_core() {
        // 0 -> 1 -> 2 -> 0, 3 isolated
        let structure = analyse_structure(4, &[(0, 1), (1, 2), (2, 0)], false);
        assert_eq!(structure.core_size, Some(3));
        let visibility = structure.visibility.expect("computed");
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(visibility[i][j], 1);
            }
        }
    }

    #[test]
    fn skipping_core_size_skips_the_closure() {
        let structure = analyse_structure(3, &[(0, 1)], true);
        assert!(structure.visibility.is_none());
        assert!(structure.change_cost.is_none());
        assert!(structure.core_size.is_none());
        assert_eq!(structure.adjacency[0][1], 1);
    }
}
