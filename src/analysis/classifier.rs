//! # Dependency Classifier
//!
//! Computes each unit's *direct* taint classification from its own local
//! evidence: the references it constructs or imports. A reference is
//! disallowed when it is neither inside the project's own namespace nor
//! under a trusted prefix; one disallowed reference taints the unit.
//!
//! Classification is pure. Malformed or unresolved references never raise;
//! they degrade to "disallowed".

use crate::analysis::TaintMode;
use crate::model::{Unit, NOT_RESOLVED};

/// The configurable "allowed reference" rule.
///
/// A reference is allowed when it lies within the project's own namespace
/// (substring containment on the configured identity) or starts with one of
/// the trusted namespace prefixes. A [`NOT_RESOLVED`]-qualified reference is
/// always external input and never allowed.
#[derive(Debug, Clone)]
pub struct AllowPredicate {
    /// Project identity string; references containing it are the project's own.
    pub project_namespace: String,

    /// Trusted namespace prefixes (e.g. `std.collections`).
    pub trusted_prefixes: Vec<String>,
}

impl AllowPredicate {
    pub fn new(project_namespace: impl Into<String>, trusted_prefixes: Vec<String>) -> Self {
        Self {
            project_namespace: project_namespace.into(),
            trusted_prefixes,
        }
    }

    /// Judges a single fully-qualified reference.
    pub fn is_allowed(&self, reference: &str) -> bool {
        if reference.starts_with(NOT_RESOLVED) {
            return false;
        }
        if !self.project_namespace.is_empty() && reference.contains(&self.project_namespace) {
            return true;
        }
        self.trusted_prefixes
            .iter()
            .any(|prefix| reference.starts_with(prefix.as_str()))
    }
}

/// Sets `directly_tainted` on a unit from its raw references.
///
/// The configured [`TaintMode`] selects which evidence feeds the rule:
/// construction references (types the unit instantiates) or import
/// references (`use` declarations).
pub fn classify(unit: &mut Unit, mode: TaintMode, predicate: &AllowPredicate) {
    let tainted = match mode {
        TaintMode::Construction => unit
            .dependencies
            .iter()
            .any(|reference| !predicate.is_allowed(reference)),
        TaintMode::Import => unit
            .imports
            .iter()
            .any(|reference| !predicate.is_allowed(reference)),
    };

    if tainted {
        log::debug!("{} directly tainted ({:?} mode)", unit.full_name(), mode);
    }
    unit.directly_tainted = tainted;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate() -> AllowPredicate {
        AllowPredicate::new("bank", vec!["std.collections".to_string()])
    }

    #[test]
    fn test_project_namespace_allowed() {
        assert!(predicate().is_allowed("bank.vault.Vault"));
        assert!(predicate().is_allowed("corp.bank.Vault"));
    }

    #[test]
    fn test_trusted_prefix_allowed() {
        assert!(predicate().is_allowed("std.collections.HashMap"));
        assert!(!predicate().is_allowed("std.fs.File"));
    }

    #[test]
    fn test_sentinel_never_allowed() {
        // Even with an empty-namespace predicate that would otherwise match
        // everything by containment, the sentinel stays external.
        let anything_goes = AllowPredicate::new("", vec![]);
        assert!(!anything_goes.is_allowed("<not resolved>.Mystery"));
        assert!(!predicate().is_allowed("<not resolved>.Mystery"));
    }

    #[test]
    fn test_external_reference_disallowed() {
        assert!(!predicate().is_allowed("reqwest.Client"));
    }

    #[test]
    fn test_construction_mode_taints_on_disallowed_dependency() {
        let mut unit = Unit::new("App", "bank", "src/app.rs");
        unit.dependencies.push("bank.vault.Vault".to_string());
        unit.dependencies.push("reqwest.Client".to_string());

        classify(&mut unit, TaintMode::Construction, &predicate());
        assert!(unit.directly_tainted);
    }

    #[test]
    fn test_construction_mode_clean_when_all_allowed() {
        let mut unit = Unit::new("App", "bank", "src/app.rs");
        unit.dependencies.push("bank.vault.Vault".to_string());
        unit.dependencies.push("std.collections.HashMap".to_string());

        classify(&mut unit, TaintMode::Construction, &predicate());
        assert!(!unit.directly_tainted);
    }

    #[test]
    fn test_import_mode_ignores_constructions() {
        let mut unit = Unit::new("App", "bank", "src/app.rs");
        unit.dependencies.push("reqwest.Client".to_string());
        unit.imports.push("bank.vault.Vault".to_string());

        classify(&mut unit, TaintMode::Import, &predicate());
        assert!(!unit.directly_tainted);

        unit.imports.push("std.fs.File".to_string());
        classify(&mut unit, TaintMode::Import, &predicate());
        assert!(unit.directly_tainted);
    }

    #[test]
    fn test_unresolved_construction_taints_directly() {
        // Scenario: resolution failed for a construction in the unit, the
        // project is "foo", and no prefixes are trusted.
        let foo = AllowPredicate::new("foo", vec![]);
        let mut unit = Unit::new("X", "foo", "src/x.rs");
        unit.dependencies.push("<not resolved>.Helper".to_string());

        classify(&mut unit, TaintMode::Construction, &foo);
        assert!(unit.directly_tainted);
    }

    #[test]
    fn test_no_references_stays_clean() {
        let mut unit = Unit::new("Plain", "bank", "src/plain.rs");
        classify(&mut unit, TaintMode::Construction, &predicate());
        assert!(!unit.directly_tainted);
        assert!(unit.is_clean());
    }
}
