//! # Report Generation Module
//!
//! Aggregates the final classified unit set, combined with the dedicated
//! test-presence signal, into per-project and per-library statistics, and
//! renders them as terminal output, JSON, or CSV.
//!
//! ## Key Types
//!
//! - [`ProjectBreakdown`] - tainted/clean x with/without-test counts per project
//! - [`LibraryBreakdown`] - the same 2x2 sliced by a library dependency
//! - [`UnitRecord`] - one classified unit as reported externally

mod csv;

pub use csv::{escape_field, format_row, to_csv};

use crate::extractor::has_dedicated_test;
use crate::model::Unit;
use colored::*;
use serde::Serialize;
use std::collections::HashSet;

/// CSV column order for per-project breakdown reports. Part of the output
/// contract for downstream consumers.
pub const PROJECT_CSV_HEADER: &[&str] = &[
    "project",
    "tainted_with_test",
    "tainted_no_test",
    "clean_with_test",
    "clean_no_test",
];

/// CSV column order for per-library breakdown reports.
pub const LIBRARY_CSV_HEADER: &[&str] = &[
    "library",
    "dep_with_test",
    "dep_no_test",
    "no_dep_with_test",
    "no_dep_no_test",
];

/// Per-project statistics relating effective taint to test presence.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectBreakdown {
    /// Project name (the scanned directory's name).
    pub project: String,

    /// Tainted units with a dedicated test.
    pub tainted_with_test: usize,

    /// Tainted units without a dedicated test.
    pub tainted_no_test: usize,

    /// Clean units with a dedicated test.
    pub clean_with_test: usize,

    /// Clean units without a dedicated test.
    pub clean_no_test: usize,
}

impl ProjectBreakdown {
    /// Computes the breakdown from a classified unit set and the collected
    /// test-file names.
    pub fn from_units(project: impl Into<String>, units: &[Unit], tests: &HashSet<String>) -> Self {
        let mut breakdown = Self {
            project: project.into(),
            tainted_with_test: 0,
            tainted_no_test: 0,
            clean_with_test: 0,
            clean_no_test: 0,
        };

        for unit in units {
            let has_test = has_dedicated_test(unit, tests);
            match (unit.is_tainted(), has_test) {
                (true, true) => breakdown.tainted_with_test += 1,
                (true, false) => breakdown.tainted_no_test += 1,
                (false, true) => breakdown.clean_with_test += 1,
                (false, false) => breakdown.clean_no_test += 1,
            }
        }

        breakdown
    }

    /// Total number of classified units.
    pub fn total(&self) -> usize {
        self.tainted_with_test + self.tainted_no_test + self.clean_with_test + self.clean_no_test
    }

    /// This breakdown as one CSV data row, column order per
    /// [`PROJECT_CSV_HEADER`].
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.project.clone(),
            self.tainted_with_test.to_string(),
            self.tainted_no_test.to_string(),
            self.clean_with_test.to_string(),
            self.clean_no_test.to_string(),
        ]
    }
}

/// Per-library statistics: units with a direct dependency on the library
/// versus units without, each split by test presence.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryBreakdown {
    /// Library substring being sliced on.
    pub library: String,

    pub dep_with_test: usize,
    pub dep_no_test: usize,
    pub no_dep_with_test: usize,
    pub no_dep_no_test: usize,
}

impl LibraryBreakdown {
    pub fn new(library: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            dep_with_test: 0,
            dep_no_test: 0,
            no_dep_with_test: 0,
            no_dep_no_test: 0,
        }
    }

    /// Folds one classified unit into the counts.
    pub fn count_unit(&mut self, unit: &Unit, has_test: bool) {
        match (unit.has_dependency_on(&self.library), has_test) {
            (true, true) => self.dep_with_test += 1,
            (true, false) => self.dep_no_test += 1,
            (false, true) => self.no_dep_with_test += 1,
            (false, false) => self.no_dep_no_test += 1,
        }
    }

    /// This breakdown as one CSV data row, column order per
    /// [`LIBRARY_CSV_HEADER`].
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.library.clone(),
            self.dep_with_test.to_string(),
            self.dep_no_test.to_string(),
            self.no_dep_with_test.to_string(),
            self.no_dep_no_test.to_string(),
        ]
    }
}

/// One classified unit as exposed in JSON reports.
#[derive(Debug, Clone, Serialize)]
pub struct UnitRecord {
    pub full_name: String,
    pub package: String,
    pub name: String,
    pub source_file: String,
    pub tainted: bool,
    pub directly_tainted: bool,
    pub indirectly_tainted: bool,
    pub has_test: bool,
    pub dependencies: Vec<String>,
}

impl UnitRecord {
    pub fn from_unit(unit: &Unit, tests: &HashSet<String>) -> Self {
        Self {
            full_name: unit.full_name(),
            package: unit.package.clone(),
            name: unit.name.clone(),
            source_file: unit.source_file.clone(),
            tainted: unit.is_tainted(),
            directly_tainted: unit.directly_tainted,
            indirectly_tainted: unit.indirectly_tainted,
            has_test: has_dedicated_test(unit, tests),
            dependencies: unit.dependencies.clone(),
        }
    }
}

/// Complete single-project report, serializable for `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub breakdown: ProjectBreakdown,
    pub units: Vec<UnitRecord>,
}

impl ProjectReport {
    /// Builds the report. With `sort` set, units are ordered by
    /// (package, name); otherwise input iteration order is kept.
    pub fn new(
        project: impl Into<String>,
        units: &[Unit],
        tests: &HashSet<String>,
        sort: bool,
    ) -> Self {
        let breakdown = ProjectBreakdown::from_units(project, units, tests);
        let mut records: Vec<UnitRecord> =
            units.iter().map(|u| UnitRecord::from_unit(u, tests)).collect();
        if sort {
            records.sort_by(|a, b| (&a.package, &a.name).cmp(&(&b.package, &b.name)));
        }
        Self { breakdown, units: records }
    }

    /// Prints colorized per-unit output to the terminal.
    pub fn print_terminal(&self) {
        if self.units.is_empty() {
            println!("\n{}", "[+] No analyzable units found.".green().bold());
            return;
        }

        println!("\n{}", "[*] Classified Units:".white().bold());
        println!("{}", "=".repeat(60).cyan());

        for record in &self.units {
            let badge = if record.directly_tainted {
                "TAINTED".white().on_red().bold()
            } else if record.indirectly_tainted {
                "TAINTED*".black().on_yellow().bold()
            } else {
                "CLEAN".black().on_green().bold()
            };
            let test_marker = if record.has_test {
                "[test]".green()
            } else {
                "[no test]".dimmed()
            };

            println!("  {} {} {}", badge, record.full_name.white(), test_marker);
            for dep in &record.dependencies {
                println!("      -> {}", dep.dimmed());
            }
        }
    }

    /// Prints the summary line with the guarded testable percentage.
    pub fn print_summary(&self) {
        let b = &self.breakdown;
        println!(
            "{}",
            format!(
                "[*] Summary: {} tainted ({} tested) | {} clean ({} tested)",
                b.tainted_with_test + b.tainted_no_test,
                b.tainted_with_test,
                b.clean_with_test + b.clean_no_test,
                b.clean_with_test,
            )
            .bold()
        );

        match testable_percentage(b) {
            Some(pct) => println!("{}", format!("[*] Testable: {:.1}%", pct).green().bold()),
            None => println!("{}", "[*] Testable: n/a (no units classified)".dimmed()),
        }
    }
}

/// Share of clean units over all classified units, or `None` when the
/// project produced zero units (the statistic is informational only and
/// must not divide by zero).
pub fn testable_percentage(breakdown: &ProjectBreakdown) -> Option<f64> {
    let total = breakdown.total();
    if total == 0 {
        return None;
    }
    let clean = breakdown.clean_with_test + breakdown.clean_no_test;
    Some(clean as f64 * 100.0 / total as f64)
}
