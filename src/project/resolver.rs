//! Syntactic dependency resolution: maps each module's raw dependency hints
//! onto indices into the analyzed module set. No module loader is involved;
//! matching is purely string-based against the supplied paths, and anything
//! that does not match is an external dependency and is silently dropped.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;

use crate::core::{DependencyPath, ModuleReport};

/// Resolve every module's hints into directed edges `(from, to)` over module
/// indices. Self-references are discarded; duplicate edges collapse.
pub(crate) fn resolve_edges(reports: &[ModuleReport]) -> Vec<(usize, usize)> {
    let index: HashMap<&str, usize> = reports
        .iter()
        .enumerate()
        .map(|(i, report)| (report.path.as_str(), i))
        .collect();

    let mut edges = Vec::new();
    for (from, report) in reports.iter().enumerate() {
        for hint in &report.dependencies {
            let DependencyPath::Literal(raw) = &hint.path else {
                trace!("skipping dynamic dependency in {}", report.path);
                continue;
            };
            match resolve_path(raw, &report.path, &report.path_aliases, &index) {
                Some(to) if to != from => {
                    if !edges.contains(&(from, to)) {
                        edges.push((from, to));
                    }
                }
                Some(_) => {}
                None => trace!("dropping unresolved dependency {raw:?} from {}", report.path),
            }
        }
    }
    edges
}

/// Resolve one literal hint against the module set. Alias substitution is
/// applied first, from the map the referencing module declared during its
/// own walk; relative paths then normalize against that module's directory
/// and fall back to the directory's default entry point.
pub(crate) fn resolve_path(
    raw: &str,
    from: &str,
    aliases: &IndexMap<String, String>,
    index: &HashMap<&str, usize>,
) -> Option<usize> {
    let substituted = aliases.get(raw).map(String::as_str).unwrap_or(raw);

    if is_relative(substituted) {
        let normalized = normalize_against(from, substituted);
        let with_index = format!("{normalized}/index");
        let with_index_file = format!("{normalized}/index.js");
        [normalized.as_str(), &with_index, &with_index_file]
            .iter()
            .find_map(|candidate| index.get(*candidate).copied())
    } else {
        index.get(substituted).copied()
    }
}

fn is_relative(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

/// Normalize a relative reference against the referencing module's path,
/// treating both as virtual `/`-separated file paths.
fn normalize_against(from: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = from.split('/').collect();
    segments.pop();
    for part in relative.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
