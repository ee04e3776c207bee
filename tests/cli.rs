// E2E tests for the mediasort CLI commands
use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

mod common;
use common::{setup_output_dir, setup_unknown_only_input};

#[test]
fn test_sort_skips_unknown_files() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let input = setup_unknown_only_input(&temp_dir);
    let output = setup_output_dir(&temp_dir);

    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    cmd.arg("sort")
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sort complete"))
        .stdout(predicate::str::contains("2 unknown files skipped"));

    // Skipped files stay where they are and nothing appears in the output
    input.child("notes.txt").assert(predicate::path::exists());
    input.child("archive.zip").assert(predicate::path::exists());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_sort_ignores_subdirectories() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let input = setup_unknown_only_input(&temp_dir);
    let output = setup_output_dir(&temp_dir);

    // Nested media must not be enumerated at all
    let nested = input.child("nested");
    nested.create_dir_all().unwrap();
    nested.child("photo.jpg").write_str("fake jpg").unwrap();

    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    cmd.arg("sort")
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success();

    nested.child("photo.jpg").assert(predicate::path::exists());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_sort_dry_run_makes_no_changes() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let input = setup_unknown_only_input(&temp_dir);
    let output = setup_output_dir(&temp_dir);

    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    cmd.arg("sort")
        .arg(input.path())
        .arg(output.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run complete"));

    input.child("notes.txt").assert(predicate::path::exists());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_sort_missing_input_dir_fails() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let output = setup_output_dir(&temp_dir);

    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    cmd.arg("sort")
        .arg(temp_dir.child("does_not_exist").path())
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_sort_input_must_be_a_directory() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let file = temp_dir.child("plain.txt");
    file.write_str("just a file").unwrap();
    let output = setup_output_dir(&temp_dir);

    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    cmd.arg("sort")
        .arg(file.path())
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_inspect_missing_file_fails() {
    let temp_dir = assert_fs::TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    cmd.arg("inspect")
        .arg(temp_dir.child("missing.jpg").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}
