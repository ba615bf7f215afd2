#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lk() -> Command {
    cargo_bin_cmd!("lotkeeper")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_lotkeeper.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_test_db(db_path: &str) {
    lk().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_family(db_path: &str, nom: &str) {
    lk().args(["--db", db_path, "--test", "family", "add", nom])
        .assert()
        .success();
}

pub fn add_product(db_path: &str, reference: &str, barcode: &str, nom: &str, famille: &str) {
    lk().args([
        "--db", db_path, "--test", "product", "add", reference, barcode, "--nom", nom,
        "--famille", famille,
    ])
    .assert()
    .success();
}

pub fn add_lot(db_path: &str, code: &str, qty: &str, fin: &str, entree: Option<&str>) {
    let mut cmd = lk();
    cmd.args(["--db", db_path, "--test", "lot", "add", code, qty, "--fin", fin]);
    if let Some(e) = entree {
        cmd.args(["--entree", e]);
    }
    cmd.assert().success();
}

/// Initialize DB and add a small dataset useful for many tests:
/// two products of one family, two future lots plus one expired lot.
pub fn init_db_with_data(db_path: &str) {
    init_test_db(db_path);

    add_family(db_path, "Antalgiques");
    add_product(db_path, "REF-A", "34000000000001", "Paracétamol", "Antalgiques");
    add_product(db_path, "REF-B", "34000000000002", "Ibuprofène", "Antalgiques");

    add_lot(db_path, "REF-A", "2", "2099-01-10", Some("2025-01-01"));
    add_lot(db_path, "REF-A", "5", "2099-03-01", Some("2025-01-01"));
    add_lot(db_path, "REF-B", "7", "2020-01-01", Some("2019-01-01"));
}
