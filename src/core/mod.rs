pub mod errors;
pub mod metrics;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder name for scopes and operands with no resolvable identifier
pub const ANONYMOUS: &str = "<anonymous>";

/// Feature toggles threaded through every syntax-rule evaluation. Each flag
/// controls whether the corresponding construct counts as a cyclomatic
/// branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub forin: bool,
    #[serde(default)]
    pub forof: bool,
    #[serde(default)]
    pub trycatch: bool,
    #[serde(default = "default_true")]
    pub switchcase: bool,
    #[serde(default = "default_true")]
    pub logicalor: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forin: false,
            forof: false,
            trycatch: false,
            switchcase: true,
            logicalor: true,
        }
    }
}

/// Project-level analysis controls
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOptions {
    /// Skip the visibility matrix and everything derived from it (core size,
    /// change cost). Adjacency and scalar means are still produced.
    #[serde(default)]
    pub no_core_size: bool,
}

/// One parsed module handed to the engine: a pre-parsed tree plus the opaque
/// path string that identifies it in the dependency graph.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceModule<N> {
    pub tree: N,
    pub path: String,
    /// Percentage of source lines that are comments, when the front end has
    /// that information. Feeds the maintainability comment bonus; `None`
    /// omits the term.
    pub comment_percent: Option<f64>,
}

impl<N> SourceModule<N> {
    pub fn new(tree: N, path: impl Into<String>) -> Self {
        Self {
            tree,
            path: path.into(),
            comment_percent: None,
        }
    }

    pub fn with_comment_percent(mut self, percent: f64) -> Self {
        self.comment_percent = Some(percent);
        self
    }
}

/// Physical and logical line counts for one scope
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sloc {
    pub physical: usize,
    pub logical: u32,
}

/// Occurrence counts for one Halstead token class (operators or operands)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HalsteadCounts {
    pub total: u32,
    pub distinct: u32,
    /// Distinct identifiers in first-seen order; always `distinct` long
    pub identifiers: Vec<String>,
}

/// Derived Halstead metrics for one scope
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    pub operators: HalsteadCounts,
    pub operands: HalsteadCounts,
    pub length: u32,
    pub vocabulary: u32,
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
    pub bugs: f64,
    pub time: f64,
}

/// Metrics shared by module aggregates and individual functions
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeMetrics {
    pub sloc: Sloc,
    pub cyclomatic: u32,
    pub cyclomatic_density: f64,
    pub halstead: HalsteadMetrics,
    pub params: usize,
}

/// One function-like scope's report, in source order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub name: String,
    pub line: usize,
    pub metrics: ScopeMetrics,
}

/// How a dependency reference was expressed in source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyKind {
    #[serde(rename = "CommonJS")]
    CommonJs,
    #[serde(rename = "AMD")]
    Amd,
    #[serde(rename = "Module")]
    Esm,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DependencyKind::CommonJs => "CommonJS",
            DependencyKind::Amd => "AMD",
            DependencyKind::Esm => "Module",
        };
        write!(f, "{s}")
    }
}

/// A dependency target: a literal path string, or a dynamic expression the
/// engine cannot resolve syntactically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyPath {
    Literal(String),
    Dynamic,
}

impl std::fmt::Display for DependencyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyPath::Literal(path) => write!(f, "{path}"),
            DependencyPath::Dynamic => write!(f, "* dynamic dependency *"),
        }
    }
}

/// One unresolved dependency reference, attached to the module root
/// regardless of how deeply in the tree it was found
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DependencyHint {
    pub line: usize,
    pub kind: DependencyKind,
    pub path: DependencyPath,
}

/// Full per-module report: the root aggregate, every function in source
/// order, raw dependency hints, and the per-function means the project
/// phase folds over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub path: String,
    pub aggregate: ScopeMetrics,
    pub functions: Vec<FunctionReport>,
    pub dependencies: Vec<DependencyHint>,
    /// AMD path aliases declared by this module, applied during resolution
    #[serde(default)]
    pub path_aliases: IndexMap<String, String>,
    pub loc: f64,
    pub cyclomatic: f64,
    pub effort: f64,
    pub params: f64,
    pub maintainability: f64,
}

/// Square 0/1 matrix, always sized to the module count
pub type Matrix = Vec<Vec<u8>>;

/// Whole-project report: per-module reports in input order, the dependency
/// design-structure matrices, and project-wide means. The `Option` fields
/// are `None` exactly when core-size computation was skipped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub reports: Vec<ModuleReport>,
    pub adjacency_matrix: Matrix,
    pub first_order_density: f64,
    pub visibility_matrix: Option<Matrix>,
    pub change_cost: Option<f64>,
    pub core_size: Option<usize>,
    pub loc: f64,
    pub cyclomatic: f64,
    pub effort: f64,
    pub params: f64,
    pub maintainability: f64,
}
