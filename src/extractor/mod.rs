//! # Unit Extractor
//!
//! Turns a project directory into the flat unit collection the analysis
//! core consumes. Responsibilities, in order:
//!
//! 1. Discover source files (recursive, filtered: no `target/`, no
//!    dedicated test files, no build descriptors).
//! 2. Parse each file with `syn` and extract its declared type plus raw
//!    construction/import references via [`ReferenceCollector`].
//! 3. Resolve each construction reference's declaring package through the
//!    file's own imports and a two-pass name index, degrading to
//!    [`NOT_RESOLVED`] on failure.
//!
//! A separate unfiltered walk collects dedicated test file names for the
//! `<Name>Test.rs` presence signal.

mod visitor;

pub use visitor::{ConstructionRef, ReferenceCollector};

use crate::model::{Unit, NOT_RESOLVED, NO_PACKAGE};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while extracting units from a project.
///
/// Parse failures are not errors (the file is skipped with a warning);
/// only I/O problems abort a project's run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A source file existed but could not be read.
    #[error("failed to read source file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A unit together with its unresolved construction references.
///
/// Intermediate product of extraction pass 1, consumed by pass 2.
#[derive(Debug)]
struct RawUnit {
    unit: Unit,
    constructions: Vec<ConstructionRef>,
}

/// Whether a file name follows the dedicated-test naming convention.
pub fn is_test_file(file_name: &str) -> bool {
    file_name.ends_with("Test.rs") || file_name.ends_with("Tests.rs")
}

/// Collects analyzable source files under `root`.
///
/// Keeps `.rs` files, skipping anything under a `target` directory,
/// dedicated test files, and `build.rs` descriptors. A missing or empty
/// directory yields an empty list, not an error.
pub fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name.ends_with(".rs")
                && !is_test_file(&name)
                && name != "build.rs"
                && !e.path().components().any(|c| c.as_os_str() == "target")
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Collects the names of all dedicated test files under `root`.
///
/// Unlike [`collect_source_files`], this walk is unfiltered apart from the
/// test naming convention itself, so tests living next to their subjects or
/// in a separate tree are found either way.
pub fn collect_test_files(root: &Path) -> HashSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| is_test_file(name))
        .collect()
}

/// Whether a unit has a dedicated test by the `<Name>Test.rs` convention.
///
/// Exact, case-sensitive match against the collected test-file set.
pub fn has_dedicated_test(unit: &Unit, tests: &HashSet<String>) -> bool {
    tests.contains(&format!("{}Test.rs", unit.name))
}

/// Derives a unit's package from its path relative to the scan root.
///
/// The project name leads the namespace (the analog of a fully-qualified
/// path starting with the crate name), followed by directory components and
/// the file stem, with `src` and `mod`/`lib`/`main` stems elided:
/// `src/bank/vault.rs` in project `demo` becomes `demo.bank.vault`. An
/// empty result maps to the [`NO_PACKAGE`] sentinel.
pub fn package_from_path(project: &str, root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut segments: Vec<String> = Vec::new();

    if !project.is_empty() {
        segments.push(project.to_string());
    }

    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            let part = component.as_os_str().to_string_lossy();
            if part != "src" {
                segments.push(part.into_owned());
            }
        }
    }

    if let Some(stem) = relative.file_stem().map(|s| s.to_string_lossy()) {
        if !matches!(stem.as_ref(), "mod" | "lib" | "main") {
            segments.push(stem.into_owned());
        }
    }

    if segments.is_empty() {
        NO_PACKAGE.to_string()
    } else {
        segments.join(".")
    }
}

/// The project name used as the leading namespace segment: the scanned
/// directory's own name.
fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extracts all units from a project directory.
///
/// Pass 1 parses every discovered file into a [`RawUnit`] and indexes each
/// declared type's package by simple name. Pass 2 resolves construction
/// references against that index and fills in `Unit::dependencies`.
///
/// # Errors
///
/// Returns [`ExtractError::Io`] if a discovered file cannot be read. Files
/// that fail to parse are logged and skipped.
pub fn extract_units(root: &Path) -> Result<Vec<Unit>, ExtractError> {
    let files = collect_source_files(root);
    log::debug!("discovered {} source files under {}", files.len(), root.display());

    let project = project_name(root);
    let mut raw_units: Vec<RawUnit> = Vec::new();
    for path in &files {
        if let Some(raw) = extract_file(&project, root, path)? {
            raw_units.push(raw);
        }
    }

    // Pass 1 index: simple type name -> declaring package. First declaration
    // wins on collision, matching discovery order.
    let mut index: HashMap<String, String> = HashMap::new();
    for raw in &raw_units {
        index
            .entry(raw.unit.name.clone())
            .or_insert_with(|| raw.unit.package.clone());
    }

    // Pass 2: resolve construction references into fully-qualified names.
    let mut units = Vec::with_capacity(raw_units.len());
    for mut raw in raw_units {
        let dependencies: Vec<String> = raw
            .constructions
            .iter()
            .map(|cref| resolve_reference(cref, &index, &raw.unit.imports, &project))
            .collect();
        raw.unit.dependencies = dependencies;
        units.push(raw.unit);
    }

    Ok(units)
}

/// Normalizes a qualifier path: leading `self`/`super` segments are dropped
/// as best-effort, a leading `crate` maps to the project name.
fn normalize_qualifier(mut segments: Vec<String>, project: &str) -> Vec<String> {
    while segments
        .first()
        .is_some_and(|s| s == "self" || s == "super")
    {
        segments.remove(0);
    }
    if segments.first().is_some_and(|s| s == "crate") {
        segments[0] = project.to_string();
    }
    segments
}

/// Resolves a construction reference to a fully-qualified dot name.
///
/// A qualified path carries its own package; an unqualified name resolves
/// through the binding an idiomatic construction actually goes through, the
/// file's own imports (`use std::collections::HashMap;` then
/// `HashMap::new()`), before the project declaration index; otherwise the
/// package degrades to the [`NOT_RESOLVED`] sentinel.
fn resolve_reference(
    cref: &ConstructionRef,
    index: &HashMap<String, String>,
    imports: &[String],
    project: &str,
) -> String {
    let name = cref.simple_name();
    let qualifier = normalize_qualifier(cref.qualifier().to_vec(), project);

    let package = if !qualifier.is_empty() {
        qualifier.join(".")
    } else if let Some(imported) = import_package(name, imports, project) {
        imported
    } else if let Some(declared) = index.get(name) {
        declared.clone()
    } else {
        NOT_RESOLVED.to_string()
    };

    format!("{}.{}", package, name)
}

/// Finds the declaring package of an unqualified name among the file's
/// imports: the first import whose last segment equals the name wins. Glob
/// imports never match (their last segment is a module, not a type).
fn import_package(name: &str, imports: &[String], project: &str) -> Option<String> {
    for import in imports {
        let mut segments: Vec<String> = import.split('.').map(str::to_string).collect();
        if segments.last().map(String::as_str) != Some(name) {
            continue;
        }
        segments.pop();
        let qualifier = normalize_qualifier(segments, project);
        if !qualifier.is_empty() {
            return Some(qualifier.join("."));
        }
    }
    None
}

/// Extracts one file into a raw unit, or `None` if it declares no concrete
/// type or cannot be parsed.
fn extract_file(project: &str, root: &Path, path: &Path) -> Result<Option<RawUnit>, ExtractError> {
    let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ast = match syn::parse_file(&source) {
        Ok(ast) => ast,
        Err(e) => {
            log::warn!("failed to parse {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    // Interfaces (trait-only files) and files with no type declaration are
    // excluded upstream of the core.
    let Some(name) = first_declared_type(&ast) else {
        return Ok(None);
    };

    let package = package_from_path(project, root, path);
    let mut unit = Unit::new(name, package, path.display().to_string());

    let refs = ReferenceCollector::collect(&ast);
    unit.imports = refs.imports;

    Ok(Some(RawUnit {
        unit,
        constructions: refs.constructions,
    }))
}

/// Finds the first concrete type (struct or enum) declared in a file,
/// looking one level into inline modules.
fn first_declared_type(ast: &syn::File) -> Option<String> {
    fn concrete_type(item: &syn::Item) -> Option<String> {
        match item {
            syn::Item::Struct(s) => Some(s.ident.to_string()),
            syn::Item::Enum(e) => Some(e.ident.to_string()),
            _ => None,
        }
    }

    for item in &ast.items {
        if let Some(name) = concrete_type(item) {
            return Some(name);
        }
        if let syn::Item::Mod(m) = item {
            if let Some((_, items)) = &m.content {
                if let Some(name) = items.iter().find_map(concrete_type) {
                    return Some(name);
                }
            }
        }
    }
    None
}
