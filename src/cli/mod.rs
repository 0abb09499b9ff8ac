//! # CLI Module
//!
//! Defines the command-line interface for testability-sentinel using the
//! `clap` derive macros for declarative argument parsing.
//!
//! ## Commands
//!
//! - `analyze` - Classify one project's units and report them
//! - `report` - Per-project CSV breakdown across a corpus directory
//! - `libraries` - Per-library CSV breakdown across a corpus directory
//! - `version` - Show version information

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// testability-sentinel command-line interface.
///
/// A static analysis tool that classifies declared types as testable or
/// tainted under a dependency-injection-violation rule and propagates the
/// classification through the construction dependency graph.
#[derive(Parser, Debug)]
#[command(name = "testability-sentinel")]
#[command(version)]
#[command(about = "Static testability analysis via dependency-injection taint propagation")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the testability-sentinel CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a single project and report its classified units.
    ///
    /// Extracts one unit per concrete type, classifies each as clean or
    /// tainted from its construction/import references, then propagates
    /// taint transitively through the construction graph.
    Analyze {
        /// Path to the project directory to analyze.
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output format for the report.
        ///
        /// Supported formats:
        /// - `terminal`: Colorized console output (default)
        /// - `json`: Machine-readable JSON format
        #[arg(short, long, default_value = "terminal")]
        format: String,

        /// Write the report to a file instead of stdout (json format).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sort reported units by (package, name) instead of discovery order.
        #[arg(short, long)]
        sort: bool,

        /// Project namespace identity for the allow predicate.
        ///
        /// References containing this string count as the project's own.
        /// Defaults to the scanned directory's name.
        #[arg(short, long)]
        project_namespace: Option<String>,

        /// Trusted namespace prefixes exempt from the disallowed judgment.
        ///
        /// Comma-separated; replaces the default trusted set.
        /// Example: --trust std.collections,std.vec
        #[arg(short, long, value_delimiter = ',')]
        trust: Vec<String>,

        /// Direct-taint detection mode: `construction` or `import`.
        #[arg(short, long, default_value = "construction")]
        mode: String,
    },

    /// Produce a per-project CSV breakdown for a corpus of projects.
    ///
    /// Every immediate subdirectory of CORPUS is analyzed as one project;
    /// one CSV row relates tainted/clean counts to dedicated-test presence.
    /// A project that fails to analyze is logged and skipped; the batch
    /// continues.
    Report {
        /// Corpus directory containing one project per subdirectory.
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,

        /// Path of the CSV file to write.
        #[arg(short, long, default_value = "testability_report.csv")]
        output: PathBuf,

        /// Project namespace identity; defaults to each project's own name.
        #[arg(short, long)]
        project_namespace: Option<String>,

        /// Trusted namespace prefixes (comma-separated, replaces defaults).
        #[arg(short, long, value_delimiter = ',')]
        trust: Vec<String>,

        /// Direct-taint detection mode: `construction` or `import`.
        #[arg(short, long, default_value = "construction")]
        mode: String,
    },

    /// Produce a per-library CSV breakdown for a corpus of projects.
    ///
    /// For each configured library substring, counts units with and without
    /// a direct dependency on it, split by dedicated-test presence.
    Libraries {
        /// Corpus directory containing one project per subdirectory.
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,

        /// Library substrings to slice on.
        ///
        /// Comma-separated. Example: --libs std.fs,std.net,reqwest
        #[arg(short, long, value_delimiter = ',', required = true)]
        libs: Vec<String>,

        /// Path of the CSV file to write.
        #[arg(short, long, default_value = "libraries_report.csv")]
        output: PathBuf,

        /// Project namespace identity; defaults to each project's own name.
        #[arg(short, long)]
        project_namespace: Option<String>,

        /// Trusted namespace prefixes (comma-separated, replaces defaults).
        #[arg(short, long, value_delimiter = ',')]
        trust: Vec<String>,

        /// Direct-taint detection mode: `construction` or `import`.
        #[arg(short, long, default_value = "construction")]
        mode: String,
    },

    /// Print version information.
    Version,
}
