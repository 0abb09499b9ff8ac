//! # Reference Collector
//!
//! AST visitor that gathers the two flat fact lists the analysis core
//! consumes from each source file: construction references (types the file
//! instantiates directly) and import references (`use` declarations).
//!
//! The core never traverses the tree itself; this visitor is the whole
//! parser collaborator surface.

use syn::visit::{self, Visit};
use syn::{ExprCall, ExprStruct, ItemUse, UseTree};

/// A raw construction reference: the path written at the construction site,
/// split into segments, before any package resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionRef {
    /// Path segments as written (e.g. `["crate", "vault", "Account"]`).
    pub segments: Vec<String>,
}

impl ConstructionRef {
    /// The simple type name: the last path segment.
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Path segments qualifying the type, as written. Empty for an
    /// unqualified reference. `crate`/`self`/`super` prefixes are kept;
    /// the resolver maps them to concrete namespaces.
    pub fn qualifier(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }
}

/// Collects construction and import references from a parsed file.
///
/// Construction references are recognized from `Type::new(..)` and
/// `Type::default()` calls and from struct-literal expressions. Import
/// references are every leaf of every `use` tree, normalized to dot paths.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    /// Raw construction references, in source order, duplicates kept.
    pub constructions: Vec<ConstructionRef>,

    /// Import references in canonical dot form (`std.io.Read`).
    pub imports: Vec<String>,
}

/// Associated functions whose call expressions count as constructions.
const CONSTRUCTOR_NAMES: &[&str] = &["new", "default", "with_capacity"];

impl ReferenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the collector over a parsed file and returns it.
    pub fn collect(ast: &syn::File) -> Self {
        let mut collector = Self::new();
        collector.visit_file(ast);
        collector
    }

    fn record_construction(&mut self, segments: Vec<String>) {
        if segments.is_empty() {
            return;
        }
        // A lowercase final segment is a free function path, not a type;
        // `Self` literals construct the unit's own type and carry no edge.
        let name = segments.last().map(String::as_str).unwrap_or_default();
        if name == "Self" || !name.chars().next().map_or(false, |c| c.is_uppercase()) {
            return;
        }
        self.constructions.push(ConstructionRef { segments });
    }

    fn flatten_use_tree(&mut self, tree: &UseTree, prefix: &mut Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.flatten_use_tree(&path.tree, prefix);
                prefix.pop();
            }
            UseTree::Name(name) => {
                let ident = name.ident.to_string();
                // `use foo::bar::{self}` imports the path itself.
                if ident == "self" {
                    self.imports.push(prefix.join("."));
                } else {
                    prefix.push(ident);
                    self.imports.push(prefix.join("."));
                    prefix.pop();
                }
            }
            UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.imports.push(prefix.join("."));
                prefix.pop();
            }
            UseTree::Glob(_) => {
                self.imports.push(prefix.join("."));
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten_use_tree(item, prefix);
                }
            }
        }
    }
}

/// Converts a syn path into plain string segments, dropping generic
/// arguments (`Vec<u8>` becomes `Vec`).
fn path_segments(path: &syn::Path) -> Vec<String> {
    path.segments.iter().map(|s| s.ident.to_string()).collect()
}

impl<'ast> Visit<'ast> for ReferenceCollector {
    fn visit_expr_call(&mut self, node: &'ast ExprCall) {
        if let syn::Expr::Path(expr_path) = &*node.func {
            let segments = path_segments(&expr_path.path);
            if segments.len() >= 2 {
                let last = segments.last().map(String::as_str).unwrap_or_default();
                if CONSTRUCTOR_NAMES.contains(&last) {
                    self.record_construction(segments[..segments.len() - 1].to_vec());
                }
            }
        }
        visit::visit_expr_call(self, node);
    }

    fn visit_expr_struct(&mut self, node: &'ast ExprStruct) {
        self.record_construction(path_segments(&node.path));
        visit::visit_expr_struct(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast ItemUse) {
        let mut prefix = Vec::new();
        self.flatten_use_tree(&node.tree, &mut prefix);
        visit::visit_item_use(self, node);
    }
}
