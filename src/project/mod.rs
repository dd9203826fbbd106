//! Project-level analysis: walks each module in input order, resolves the
//! dependency graph and folds per-module scalars into project means. The
//! engine is synchronous by contract — one module's walk completes before
//! the next begins, and graph analysis runs only once every raw report is
//! available.

mod dsm;
mod resolver;

use std::collections::HashSet;

use log::debug;

use crate::ast::AstAdapter;
use crate::core::errors::{Error, Result};
use crate::core::{metrics, ModuleReport, ProjectOptions, ProjectReport, Settings, SourceModule};
use crate::walker::walk_module;

/// Analyse a module set end to end, producing the full project report.
pub fn analyse<A: AstAdapter>(
    modules: &[SourceModule<A::Node>],
    adapter: &A,
    settings: &Settings,
    options: &ProjectOptions,
) -> Result<ProjectReport> {
    let reports = analyse_modules(modules, adapter, settings)?;
    Ok(process_results(reports, options))
}

/// Walk every module and return the raw per-module reports, deferring the
/// cross-module work. `process_results` on the output is observationally
/// equivalent to calling [`analyse`] directly.
pub fn analyse_modules<A: AstAdapter>(
    modules: &[SourceModule<A::Node>],
    adapter: &A,
    settings: &Settings,
) -> Result<Vec<ModuleReport>> {
    validate(modules)?;
    debug!("analysing {} modules", modules.len());
    Ok(modules
        .iter()
        .map(|module| walk_module(module, adapter, settings))
        .collect())
}

/// Finish a raw report set: resolve dependencies, run the DSM analysis and
/// compute project-wide means.
pub fn process_results(reports: Vec<ModuleReport>, options: &ProjectOptions) -> ProjectReport {
    let edges = resolver::resolve_edges(&reports);
    debug!(
        "resolved {} dependency edges across {} modules",
        edges.len(),
        reports.len()
    );
    let structure = dsm::analyse_structure(reports.len(), &edges, options.no_core_size);
    let means = project_means(&reports);

    ProjectReport {
        reports,
        adjacency_matrix: structure.adjacency,
        first_order_density: structure.first_order_density,
        visibility_matrix: structure.visibility,
        change_cost: structure.change_cost,
        core_size: structure.core_size,
        loc: means.loc,
        cyclomatic: means.cyclomatic,
        effort: means.effort,
        params: means.params,
        maintainability: means.maintainability,
    }
}

fn validate<N>(modules: &[SourceModule<N>]) -> Result<()> {
    let mut seen = HashSet::new();
    for module in modules {
        if module.path.is_empty() {
            return Err(Error::InvalidInput("module path is empty".to_string()));
        }
        if !seen.insert(module.path.as_str()) {
            return Err(Error::InvalidInput(format!(
                "duplicate module path: {}",
                module.path
            )));
        }
    }
    Ok(())
}

struct Means {
    loc: f64,
    cyclomatic: f64,
    effort: f64,
    params: f64,
    maintainability: f64,
}

fn project_means(reports: &[ModuleReport]) -> Means {
    let count = reports.len();
    let sums = reports.iter().fold((0.0, 0.0, 0.0, 0.0, 0.0), |acc, r| {
        (
            acc.0 + r.loc,
            acc.1 + r.cyclomatic,
            acc.2 + r.effort,
            acc.3 + r.params,
            acc.4 + r.maintainability,
        )
    });
    Means {
        loc: metrics::mean(sums.0, count),
        cyclomatic: metrics::mean(sums.1, count),
        effort: metrics::mean(sums.2, count),
        params: metrics::mean(sums.3, count),
        maintainability: metrics::mean(sums.4, count),
    }
}
