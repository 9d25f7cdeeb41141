//! End-to-end tests for the flatrow CLI

use assert_cmd::Command;
use predicates::prelude::*;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("fixture to be written");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_convert_header_csv_to_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "people.csv", "name,age\nalice,30\nbob,\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["convert", &path, "--header"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"name\":\"alice\",\"age\":\"30\"}"))
        .stdout(predicate::str::contains("{\"name\":\"bob\",\"age\":null}"));
}

#[test]
fn test_convert_skips_leading_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "export.csv", "exported yesterday\na,b\n1,2\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["convert", &path, "--header", "--skip-rows", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"a\":\"1\",\"b\":\"2\"}"));
}

#[test]
fn test_convert_delimited_with_explicit_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "data.tsv", "1\t2\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args([
            "convert",
            &path,
            "--format",
            "delimited",
            "--columns",
            "x,y",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"x\":\"1\",\"y\":\"2\"}"));
}

#[test]
fn test_convert_fails_on_malformed_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "a,b\n1,2\noops\"\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["convert", &path, "--header"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to parse row"));
}

#[test]
fn test_keep_going_reports_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "a,b\n1,2\noops\"\n3,4\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["convert", &path, "--header", "--keep-going"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"a\":\"3\",\"b\":\"4\"}"))
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_columns_resolves_header_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "people.csv", "name,age\nalice,30\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["columns", &path, "--header"])
        .assert()
        .success()
        .stdout(predicate::str::diff("name\nage\n"));
}

#[test]
fn test_columns_generates_defaults_for_schema_less_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "plain.csv", "1,2,3\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["columns", &path])
        .assert()
        .success()
        .stdout(predicate::str::diff("column_1\ncolumn_2\ncolumn_3\n"));
}

#[test]
fn test_missing_file_is_an_error() {
    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["convert", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn test_config_file_layers_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        &dir,
        "flatrow.toml",
        "[mapping]\nhas_header_row = true\n",
    );
    let path = write_file(&dir, "people.csv", "name,age\nalice,30\n");

    Command::cargo_bin("flatrow")
        .unwrap()
        .args(["convert", &path, "--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"name\":\"alice\",\"age\":\"30\"}"));
}
