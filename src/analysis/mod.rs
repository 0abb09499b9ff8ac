//! # Analysis Pipeline
//!
//! Per-run orchestration of the three strictly sequential phases:
//! extraction, direct classification, and taint propagation. All state
//! lives in the unit collection owned by the run; there is no process-wide
//! accumulation across projects.
//!
//! ## Key Types
//!
//! - [`AnalysisConfig`] - the configuration surface for one analysis run
//! - [`TaintMode`] - which evidence feeds the direct-taint rule
//! - [`AllowPredicate`] - the configurable "allowed reference" rule

mod classifier;
mod propagation;

pub use classifier::{classify, AllowPredicate};
pub use propagation::propagate;

use crate::extractor::{self, ExtractError};
use crate::model::Unit;
use std::path::Path;

/// Selects which raw evidence the direct-taint rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaintMode {
    /// Taint from disallowed constructed types (the default rule).
    #[default]
    Construction,

    /// Taint from disallowed import declarations.
    Import,
}

impl TaintMode {
    /// Parses a taint mode from a string, defaulting to `Construction`
    /// for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "import" | "imports" => TaintMode::Import,
            _ => TaintMode::Construction,
        }
    }
}

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Project identity; references containing it count as the project's own.
    pub project_namespace: String,

    /// Trusted namespace prefixes exempt from the disallowed judgment.
    pub trusted_prefixes: Vec<String>,

    /// Which evidence feeds direct classification.
    pub taint_mode: TaintMode,
}

impl AnalysisConfig {
    /// Creates a config for the given project identity with the default
    /// trusted prefixes and construction-based taint detection.
    pub fn for_project(project_namespace: impl Into<String>) -> Self {
        Self {
            project_namespace: project_namespace.into(),
            trusted_prefixes: default_trusted_prefixes(),
            taint_mode: TaintMode::default(),
        }
    }

    /// The allow predicate induced by this configuration.
    pub fn allow_predicate(&self) -> AllowPredicate {
        AllowPredicate::new(self.project_namespace.clone(), self.trusted_prefixes.clone())
    }
}

/// Default trusted namespaces: core collection and value types that do not
/// undermine testability when constructed directly.
pub fn default_trusted_prefixes() -> Vec<String> {
    ["std.collections", "std.vec", "std.string", "std.option", "std.result"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Runs the full analysis pipeline over one project directory.
///
/// Extracts units, classifies each from its own evidence, then propagates
/// taint to a fixed point. Returns the final classified unit collection.
///
/// # Errors
///
/// Fails only on I/O problems while reading source files; a missing or
/// empty directory yields an empty collection.
pub fn analyze_project(root: &Path, config: &AnalysisConfig) -> Result<Vec<Unit>, ExtractError> {
    let mut units = extractor::extract_units(root)?;
    log::info!(
        "analyzing {}: {} units, mode {:?}",
        root.display(),
        units.len(),
        config.taint_mode
    );

    let predicate = config.allow_predicate();
    for unit in &mut units {
        classify(unit, config.taint_mode, &predicate);
    }

    propagate(&mut units);
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_taint_mode_from_str() {
        assert_eq!(TaintMode::from_str("import"), TaintMode::Import);
        assert_eq!(TaintMode::from_str("IMPORTS"), TaintMode::Import);
        assert_eq!(TaintMode::from_str("construction"), TaintMode::Construction);
        assert_eq!(TaintMode::from_str("bogus"), TaintMode::Construction);
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();

        // reader constructs an external type directly; app constructs reader.
        fs::write(
            src.join("reader.rs"),
            r#"
            pub struct Reader;
            impl Reader {
                pub fn open(&self) {
                    let f = std::fs::File::new();
                }
            }
            "#,
        )
        .unwrap();
        fs::write(
            src.join("app.rs"),
            r#"
            pub struct App;
            impl App {
                pub fn run(&self) {
                    let r = Reader::new();
                }
            }
            "#,
        )
        .unwrap();
        fs::write(src.join("plain.rs"), "pub struct Plain;").unwrap();

        // Packages carry the project directory name as their leading
        // segment, so the default identity predicate matches local units.
        let project = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        let config = AnalysisConfig::for_project(project);

        let units = analyze_project(dir.path(), &config).unwrap();
        let find = |n: &str| units.iter().find(|u| u.name == n).unwrap();

        assert!(find("Reader").directly_tainted);
        assert!(find("App").indirectly_tainted);
        assert!(!find("App").directly_tainted);
        assert!(find("Plain").is_clean());
    }

    #[test]
    fn test_trusted_import_construction_stays_clean() {
        // The idiomatic form: import the type, construct it unqualified.
        // Resolution must go through the import so the trusted prefix
        // applies in construction mode.
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("cache.rs"),
            r#"
            use std::collections::HashMap;

            pub struct Cache;
            impl Cache {
                pub fn build(&self) {
                    let m: HashMap<String, u32> = HashMap::new();
                }
            }
            "#,
        )
        .unwrap();

        let project = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        let config = AnalysisConfig::for_project(project);

        let units = analyze_project(dir.path(), &config).unwrap();
        assert_eq!(units[0].dependencies, vec!["std.collections.HashMap"]);
        assert!(!units[0].directly_tainted);
        assert!(units[0].is_clean());
    }

    #[test]
    fn test_missing_directory_yields_empty_run() {
        let config = AnalysisConfig::for_project("x");
        let units = analyze_project(Path::new("/no/such/corpus"), &config).unwrap();
        assert!(units.is_empty());
    }
}
