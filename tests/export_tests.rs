use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, lk, setup_test_db, temp_out};

#[test]
fn test_export_lots_csv() {
    let db_path = setup_test_db("export_lots_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_lots_csv", "csv");

    lk().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("REF-A"));
    assert!(content.contains("REF-B"));
    assert!(content.contains("2099-01-10"));
    // the expired lot carries the danger level
    assert!(content.contains("danger"));
}

#[test]
fn test_export_lots_json() {
    let db_path = setup_test_db("export_lots_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_lots_json", "json");

    lk().args([
        "--db", &db_path, "--test", "export", "--format", "json", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array of lots");
    assert_eq!(rows.len(), 3);

    // FEFO order: the expired lot comes first
    assert_eq!(rows[0]["reference"], "REF-B");
    assert_eq!(rows[0]["niveau"], "danger");
    assert_eq!(rows[1]["reference"], "REF-A");
}

#[test]
fn test_export_rejects_relative_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    lk().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", "out.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites_existing_file() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);

    let out = temp_out("export_force", "csv");
    fs::write(&out, "old content").unwrap();

    lk().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out, "-f",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(!content.contains("old content"));
    assert!(content.contains("REF-A"));
}

#[test]
fn test_export_empty_database_warns() {
    let db_path = setup_test_db("export_empty");

    lk().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let out = temp_out("export_empty", "csv");

    lk().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("No lots found"));
}
