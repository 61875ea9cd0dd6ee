use std::{fs, io::Write};

use assert_cmd::Command;
use coltype::column::DirectiveList;
use predicates::str::contains;
use tempfile::tempdir;

fn write_sample_csv(delimiter: u8) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sample.csv");
    let mut file = fs::File::create(&path).expect("create sample csv");
    let d = delimiter as char;
    writeln!(file, "id{d}amount{d}active{d}note").unwrap();
    writeln!(file, "1{d}42.5{d}TRUE{d}first").unwrap();
    writeln!(file, "2{d}13.37{d}FALSE{d}second").unwrap();
    writeln!(file, "3{d}NA{d}NA{d}NA").unwrap();
    (dir, path)
}

#[test]
fn guess_prints_a_type_per_column() {
    let (_dir, csv_path) = write_sample_csv(b',');
    Command::cargo_bin("coltype")
        .expect("binary exists")
        .args(["guess", "-i", csv_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("id: integer"))
        .stdout(contains("amount: double"))
        .stdout(contains("active: logical"))
        .stdout(contains("note: character"));
}

#[test]
fn guess_writes_a_directive_list_with_custom_delimiter() {
    let (dir, csv_path) = write_sample_csv(b';');
    let meta_path = dir.path().join("types.yml");
    Command::cargo_bin("coltype")
        .expect("binary exists")
        .args([
            "guess",
            "-i",
            csv_path.to_str().unwrap(),
            "-o",
            meta_path.to_str().unwrap(),
            "--delimiter",
            ";",
        ])
        .assert()
        .success();

    let list = DirectiveList::load(&meta_path).expect("load guessed directives");
    assert_eq!(list.columns.len(), 4);
    assert_eq!(list.columns[0].name, "id");
    assert_eq!(list.columns[0].directive.to_string(), "integer");
}

#[test]
fn parse_reports_row_count_and_types() {
    let (_dir, csv_path) = write_sample_csv(b',');
    Command::cargo_bin("coltype")
        .expect("binary exists")
        .args([
            "parse",
            "-i",
            csv_path.to_str().unwrap(),
            "-t",
            "integer,double,logical,skip",
        ])
        .assert()
        .success()
        .stdout(contains("rows: 3"))
        .stdout(contains("amount: double (missing: 1, failed: 0)"))
        .stdout(contains("note: skip (missing: -, failed: 0)"));
}

#[test]
fn parse_rejects_unknown_type_directives() {
    let (_dir, csv_path) = write_sample_csv(b',');
    Command::cargo_bin("coltype")
        .expect("binary exists")
        .args([
            "parse",
            "-i",
            csv_path.to_str().unwrap(),
            "-t",
            "integer,complex,logical,skip",
        ])
        .assert()
        .failure()
        .stderr(contains("Unsupported column type"));
}
