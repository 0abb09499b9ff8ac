//! # Unit Data Model
//!
//! Defines the core data structure for testability analysis: one [`Unit`]
//! per analyzable declared type, carrying its construction dependencies and
//! the two taint flags mutated by the classification and propagation phases.
//!
//! "Dependency" here always means a violation of the dependency injection
//! principle: a type the unit constructs itself instead of receiving.

use serde::Serialize;

/// Sentinel package for units declared at the crate root.
pub const NO_PACKAGE: &str = "<no package>";

/// Sentinel package for construction references whose declaring namespace
/// could not be resolved. Sentinel-qualified references are always treated
/// as external input by the allow predicate.
pub const NOT_RESOLVED: &str = "<not resolved>";

/// One analyzable source type and its extracted dependency facts.
///
/// A `Unit` is created by the extractor, has `directly_tainted` set exactly
/// once by the classifier, and may have `indirectly_tainted` set by the
/// propagator. Everything else is immutable after creation; there is no
/// cross-run state.
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    /// Simple identifier of the declared type.
    pub name: String,

    /// Namespace path in canonical dot form, or [`NO_PACKAGE`].
    pub package: String,

    /// Path to the source file the unit was extracted from.
    pub source_file: String,

    /// Fully-qualified names of directly constructed types, in append order.
    ///
    /// Duplicates are allowed; order carries no meaning beyond containment.
    pub dependencies: Vec<String>,

    /// Raw import references gathered from `use` declarations, dot form.
    pub imports: Vec<String>,

    /// Set by the classifier from the unit's own local evidence.
    pub directly_tainted: bool,

    /// Set only by the propagator; once true it never reverts within a run.
    pub indirectly_tainted: bool,
}

impl Unit {
    /// Creates a new unit with no dependencies and both taint flags clear.
    pub fn new(name: impl Into<String>, package: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            source_file: source_file.into(),
            dependencies: Vec::new(),
            imports: Vec::new(),
            directly_tainted: false,
            indirectly_tainted: false,
        }
    }

    /// Fully-qualified name, the join key for propagation.
    ///
    /// Unique within one analysis run; matching is exact, case-sensitive
    /// string equality.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    /// Effective taint: direct OR indirect.
    pub fn is_tainted(&self) -> bool {
        self.directly_tainted || self.indirectly_tainted
    }

    /// A unit is clean when neither taint flag is set.
    pub fn is_clean(&self) -> bool {
        !self.is_tainted()
    }

    /// Whether any dependency contains the given substring.
    ///
    /// Used for per-library report slicing.
    pub fn has_dependency_on(&self, library: &str) -> bool {
        self.dependencies.iter().any(|d| d.contains(library))
    }
}
