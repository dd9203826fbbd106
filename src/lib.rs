//! complexmap computes software-complexity metrics for a corpus of
//! pre-parsed source modules and derives the project's dependency structure
//! from them: Halstead and cyclomatic complexity, logical/physical size and
//! the maintainability index per function and per module, plus a dependency
//! design-structure matrix (adjacency, visibility, core size, change cost,
//! first-order density) across the whole set.
//!
//! The engine never parses text. Front ends hand it `{tree, path}` pairs
//! together with an [`AstAdapter`] that knows how to read their tree shape;
//! the bundled [`ast::estree`] adapter covers ESTree-style JSON out of the
//! box.

// Export modules for library usage
pub mod ast;
pub mod core;
pub mod project;
pub mod syntax;
pub mod walker;

// Re-export commonly used types
pub use crate::core::errors::{Error, Result};
pub use crate::core::{
    DependencyHint, DependencyKind, DependencyPath, FunctionReport, HalsteadCounts,
    HalsteadMetrics, Matrix, ModuleReport, ProjectOptions, ProjectReport, ScopeMetrics, Settings,
    Sloc, SourceModule, ANONYMOUS,
};

pub use crate::ast::{Attr, AstAdapter};
pub use crate::project::{analyse, analyse_modules, process_results};
pub use crate::walker::{walk_module, WalkContext};
