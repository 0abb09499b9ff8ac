//! # Testability-Sentinel CLI Entry Point
//!
//! Main entry point for the testability-sentinel command-line tool:
//! initializes logging, parses arguments, and dispatches to the analyze,
//! report, and libraries command handlers.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use testability_sentinel::analysis::{analyze_project, AnalysisConfig, TaintMode};
use testability_sentinel::extractor::collect_test_files;
use testability_sentinel::report::{
    to_csv, LibraryBreakdown, ProjectBreakdown, ProjectReport, LIBRARY_CSV_HEADER,
    PROJECT_CSV_HEADER,
};
use testability_sentinel::Cli;

/// ASCII art banner displayed at startup.
const BANNER: &str = r#"
 _____         _        _     _ _ _ _            ____             _   _            _
|_   _|__  ___| |_ __ _| |__ (_) (_) |_ _   _   / ___|  ___ _ __ | |_(_)_ __   ___| |
  | |/ _ \/ __| __/ _` | '_ \| | | | __| | | |  \___ \ / _ \ '_ \| __| | '_ \ / _ \ |
  | |  __/\__ \ || (_| | |_) | | | | |_| |_| |   ___) |  __/ | | | |_| | | | |  __/ |
  |_|\___||___/\__\__,_|_.__/|_|_|_|\__|\__, |  |____/ \___|_| |_|\__|_|_| |_|\___|_|
                                        |___/
                 Dependency-Injection Testability Scanner
"#;

/// Application entry point.
///
/// Initializes the logging system, displays the banner, parses command-line
/// arguments, and dispatches to the appropriate command handler.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{}", BANNER.cyan().bold());

    let cli = Cli::parse();

    match cli.command {
        testability_sentinel::cli::Commands::Analyze {
            path,
            format,
            output,
            sort,
            project_namespace,
            trust,
            mode,
        } => {
            run_analyze(path, format, output, sort, project_namespace, trust, mode)?;
        }
        testability_sentinel::cli::Commands::Report {
            corpus,
            output,
            project_namespace,
            trust,
            mode,
        } => {
            run_report(corpus, output, project_namespace, trust, mode)?;
        }
        testability_sentinel::cli::Commands::Libraries {
            corpus,
            libs,
            output,
            project_namespace,
            trust,
            mode,
        } => {
            run_libraries(corpus, libs, output, project_namespace, trust, mode)?;
        }
        testability_sentinel::cli::Commands::Version => {
            println!(
                "{} {}",
                "testability-sentinel version:".green(),
                env!("CARGO_PKG_VERSION").yellow()
            );
        }
    }

    Ok(())
}

/// Builds the analysis configuration from the shared CLI options.
///
/// The project namespace defaults to the scanned directory's name; an
/// explicit `--trust` list replaces the default trusted prefixes.
fn build_config(
    path: &Path,
    project_namespace: Option<String>,
    trust: Vec<String>,
    mode: &str,
) -> AnalysisConfig {
    let namespace = project_namespace.unwrap_or_else(|| {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let mut config = AnalysisConfig::for_project(namespace);
    if !trust.is_empty() {
        config.trusted_prefixes = trust;
    }
    config.taint_mode = TaintMode::from_str(mode);
    config
}

/// Executes the single-project analyze operation.
fn run_analyze(
    path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    sort: bool,
    project_namespace: Option<String>,
    trust: Vec<String>,
    mode: String,
) -> Result<()> {
    println!(
        "{} {}",
        "[*] Analyzing:".green().bold(),
        path.display().to_string().yellow()
    );

    let config = build_config(&path, project_namespace, trust, mode.as_str());
    let units = analyze_project(&path, &config)?;
    let tests = collect_test_files(&path);

    let project_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let report = ProjectReport::new(project_name, &units, &tests, sort);

    match format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            if let Some(ref out_path) = output {
                std::fs::write(out_path, &json)?;
                println!(
                    "{} {}",
                    "[+] Report saved to:".green(),
                    out_path.display().to_string().yellow()
                );
            } else {
                println!("{}", json);
            }
        }
        _ => {
            report.print_terminal();
        }
    }

    println!("\n{}", "=".repeat(60).cyan());
    report.print_summary();

    Ok(())
}

/// Collects the immediate project subdirectories of a corpus directory.
///
/// A missing corpus yields an empty list; downstream reports then contain
/// only the header row.
fn collect_projects(corpus: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(corpus) else {
        log::warn!("corpus directory {} not readable", corpus.display());
        return Vec::new();
    };

    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect()
}

/// Builds a progress bar over the corpus projects.
fn corpus_progress(len: usize) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

/// Executes the per-project corpus report.
///
/// Each project is analyzed independently; a failing project is logged and
/// skipped without aborting the batch.
fn run_report(
    corpus: PathBuf,
    output: PathBuf,
    project_namespace: Option<String>,
    trust: Vec<String>,
    mode: String,
) -> Result<()> {
    println!(
        "{} {}",
        "[*] Reporting corpus:".green().bold(),
        corpus.display().to_string().yellow()
    );

    let projects = collect_projects(&corpus);
    let pb = corpus_progress(projects.len());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for project in &projects {
        let name = project
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| project.display().to_string());
        pb.set_message(format!("Analyzing {}", name));

        let config = build_config(project, project_namespace.clone(), trust.clone(), &mode);
        match analyze_project(project, &config) {
            Ok(units) => {
                let tests = collect_test_files(project);
                let breakdown = ProjectBreakdown::from_units(name, &units, &tests);
                rows.push(breakdown.csv_row());
            }
            Err(e) => {
                log::error!("skipping project {}: {}", project.display(), e);
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    std::fs::write(&output, to_csv(PROJECT_CSV_HEADER, &rows))?;
    println!(
        "{} {} ({} projects)",
        "[+] Report saved to:".green().bold(),
        output.display().to_string().yellow(),
        rows.len()
    );

    Ok(())
}

/// Executes the per-library corpus report.
///
/// Library counters accumulate across every project in the corpus; row
/// order follows the configured library order.
fn run_libraries(
    corpus: PathBuf,
    libs: Vec<String>,
    output: PathBuf,
    project_namespace: Option<String>,
    trust: Vec<String>,
    mode: String,
) -> Result<()> {
    println!(
        "{} {}",
        "[*] Library report for corpus:".green().bold(),
        corpus.display().to_string().yellow()
    );

    let mut breakdowns: Vec<LibraryBreakdown> =
        libs.into_iter().map(LibraryBreakdown::new).collect();

    let projects = collect_projects(&corpus);
    let pb = corpus_progress(projects.len());

    for project in &projects {
        pb.set_message(format!(
            "Analyzing {}",
            project.file_name().unwrap_or_default().to_string_lossy()
        ));

        let config = build_config(project, project_namespace.clone(), trust.clone(), &mode);
        match analyze_project(project, &config) {
            Ok(units) => {
                let tests = collect_test_files(project);
                for unit in &units {
                    let has_test =
                        testability_sentinel::extractor::has_dedicated_test(unit, &tests);
                    for breakdown in &mut breakdowns {
                        breakdown.count_unit(unit, has_test);
                    }
                }
            }
            Err(e) => {
                log::error!("skipping project {}: {}", project.display(), e);
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    let rows: Vec<Vec<String>> = breakdowns.iter().map(|b| b.csv_row()).collect();
    std::fs::write(&output, to_csv(LIBRARY_CSV_HEADER, &rows))?;
    println!(
        "{} {} ({} libraries)",
        "[+] Report saved to:".green().bold(),
        output.display().to_string().yellow(),
        rows.len()
    );

    Ok(())
}
