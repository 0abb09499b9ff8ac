//! End-to-end tests driving the compiled binary against fixture projects
//! written into a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// Writes a fixture project with one tainted unit, one dependent unit, one
/// clean unit, and a dedicated test for the clean unit.
fn write_fixture_project(root: &Path) {
    let src = root.join("src");
    fs::create_dir_all(&src).unwrap();

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
    fs::write(src.join("PlainTest.rs"), "pub struct PlainTest;").unwrap();
}

#[test]
fn analyze_reports_taint_closure() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("fixture");
    write_fixture_project(&project);

    let mut cmd = Command::cargo_bin("testability-sentinel").unwrap();
    cmd.arg("analyze")
        .arg(&project)
        .arg("--project-namespace")
        .arg("fixture")
        .assert()
        .success()
        .stdout(predicate::str::contains("fixture.reader.Reader"))
        .stdout(predicate::str::contains("fixture.app.App"))
        .stdout(predicate::str::contains("TAINTED"))
        .stdout(predicate::str::contains("CLEAN"));
}

#[test]
fn analyze_json_output_marks_indirect_taint() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("fixture");
    write_fixture_project(&project);

    let out = dir.path().join("report.json");
    let mut cmd = Command::cargo_bin("testability-sentinel").unwrap();
    cmd.arg("analyze")
        .arg(&project)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&out)
        .arg("--sort")
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let units = json["units"].as_array().unwrap();
    assert_eq!(units.len(), 3);

    let find = |name: &str| {
        units
            .iter()
            .find(|u| u["name"] == name)
            .unwrap_or_else(|| panic!("unit {name} missing"))
    };

    assert_eq!(find("Reader")["directly_tainted"], true);
    assert_eq!(find("App")["directly_tainted"], false);
    assert_eq!(find("App")["indirectly_tainted"], true);
    assert_eq!(find("Plain")["tainted"], false);
    assert_eq!(find("Plain")["has_test"], true);
}

#[test]
fn report_writes_per_project_csv() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_fixture_project(&corpus.join("alpha"));

    // Second project: a single clean unit, no tests.
    let beta_src = corpus.join("beta").join("src");
    fs::create_dir_all(&beta_src).unwrap();
    fs::write(beta_src.join("solo.rs"), "pub struct Solo;").unwrap();

    let out = dir.path().join("report.csv");
    let mut cmd = Command::cargo_bin("testability-sentinel").unwrap();
    cmd.arg("report")
        .arg(&corpus)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "project,tainted_with_test,tainted_no_test,clean_with_test,clean_no_test"
    );

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    // Fixture: Reader + App tainted without tests, Plain clean with test.
    assert!(rows.contains(&"alpha,0,2,1,0"));
    assert!(rows.contains(&"beta,0,0,0,1"));
}

#[test]
fn libraries_writes_per_library_csv() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_fixture_project(&corpus.join("alpha"));

    let out = dir.path().join("libs.csv");
    let mut cmd = Command::cargo_bin("testability-sentinel").unwrap();
    cmd.arg("libraries")
        .arg(&corpus)
        .arg("--libs")
        .arg("std.fs,std.net")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "library,dep_with_test,dep_no_test,no_dep_with_test,no_dep_no_test"
    );
    // Reader depends on std.fs; App and Plain do not.
    assert_eq!(lines[1], "std.fs,0,1,1,1");
    assert_eq!(lines[2], "std.net,0,0,1,2");
}

#[test]
fn analyze_empty_directory_reports_na() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("empty");
    fs::create_dir_all(&project).unwrap();

    let mut cmd = Command::cargo_bin("testability-sentinel").unwrap();
    cmd.arg("analyze")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("n/a"));
}
