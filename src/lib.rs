//! # Testability-Sentinel Library
//!
//! A static analysis library that assesses which declared types in a Rust
//! project are "testable" under a dependency-injection-violation rule, and
//! propagates that classification transitively through the project's
//! object-construction dependency graph.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and argument parsing
//! - [`model`] - The `Unit` data model shared by all phases
//! - [`extractor`] - Source discovery, AST extraction, reference resolution
//! - [`analysis`] - Direct classification and fixed-point taint propagation
//! - [`report`] - Per-project and per-library statistics, CSV/JSON output
//!
//! ## Example
//!
//! ```rust,ignore
//! use testability_sentinel::analysis::{analyze_project, AnalysisConfig};
//! use testability_sentinel::extractor::collect_test_files;
//! use testability_sentinel::report::ProjectReport;
//!
//! let config = AnalysisConfig::for_project("my_project");
//! let units = analyze_project(Path::new("./my_project"), &config)?;
//! let tests = collect_test_files(Path::new("./my_project"));
//! let report = ProjectReport::new("my_project", &units, &tests, false);
//! ```

pub mod analysis;
pub mod cli;
pub mod extractor;
pub mod model;
pub mod report;

pub use analysis::{analyze_project, AnalysisConfig, TaintMode};
pub use cli::Cli;
pub use model::Unit;
pub use report::{LibraryBreakdown, ProjectBreakdown, ProjectReport};
