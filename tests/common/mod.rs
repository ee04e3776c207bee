use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

/// Lay out an input directory holding only files the sorter will skip,
/// so no metadata extraction is ever attempted.
pub fn setup_unknown_only_input(temp_dir: &TempDir) -> ChildPath {
    let input = temp_dir.child("input");
    input.create_dir_all().unwrap();
    input.child("notes.txt").write_str("not media").unwrap();
    input.child("archive.zip").write_str("still not media").unwrap();
    input
}

pub fn setup_output_dir(temp_dir: &TempDir) -> ChildPath {
    let output = temp_dir.child("output");
    output.create_dir_all().unwrap();
    output
}
