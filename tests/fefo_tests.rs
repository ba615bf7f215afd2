use chrono::NaiveDate;
use lotkeeper::core::fefo::{FefoPreview, pick, preview};
use predicates::prelude::PredicateBooleanExt;
use lotkeeper::models::lot::Lot;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, lk, setup_test_db};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn lot(id: i64, reference: &str, barcode: &str, qty: u32, fin: &str) -> Lot {
    let mut l = Lot::new(1, qty, d("2023-12-01"), d(fin));
    l.id = id;
    l.reference = reference.to_string();
    l.barcode = barcode.to_string();
    l.produit_nom = Some(format!("Produit {}", reference));
    l
}

fn sample_lots() -> Vec<Lot> {
    vec![
        lot(1, "REF-A", "34000000000001", 4, "2024-02-01"),
        lot(2, "REF-A", "34000000000001", 2, "2024-01-05"),
        lot(3, "REF-A", "34000000000001", 9, "2024-03-01"),
        lot(4, "REF-B", "34000000000002", 5, "2024-01-01"),
    ]
}

#[test]
fn picks_nearest_expiry_among_matching_lots() {
    let lots = sample_lots();
    let best = pick(&lots, "REF-A").unwrap();
    assert_eq!(best.id, 2);
    assert_eq!(best.date_fin, d("2024-01-05"));
}

#[test]
fn matches_by_barcode_too() {
    let lots = sample_lots();
    let best = pick(&lots, "34000000000002").unwrap();
    assert_eq!(best.id, 4);
}

#[test]
fn match_is_case_insensitive_and_trimmed() {
    let lots = sample_lots();
    let best = pick(&lots, "  ref-a  ").unwrap();
    assert_eq!(best.id, 2);
}

#[test]
fn zero_quantity_lots_are_skipped() {
    let mut lots = sample_lots();
    lots[1].quantite = 0; // the would-be winner
    let best = pick(&lots, "REF-A").unwrap();
    assert_eq!(best.id, 1); // next earliest expiry
}

#[test]
fn equal_expiry_keeps_first_in_original_order() {
    let lots = vec![
        lot(10, "REF-X", "34000000000009", 1, "2024-05-01"),
        lot(11, "REF-X", "34000000000009", 1, "2024-05-01"),
    ];
    let best = pick(&lots, "REF-X").unwrap();
    assert_eq!(best.id, 10);
}

#[test]
fn empty_nearest_lot_falls_through_to_next_expiry() {
    let lots = vec![
        lot(1, "A", "30000001", 2, "2024-01-10"),
        lot(2, "A", "30000001", 5, "2024-01-05"),
        lot(3, "A", "30000001", 0, "2024-01-01"),
    ];
    let best = pick(&lots, "A").unwrap();
    assert_eq!(best.date_fin, d("2024-01-05"));
}

#[test]
fn no_match_returns_none() {
    let lots = sample_lots();
    assert!(pick(&lots, "UNKNOWN").is_none());
    assert!(pick(&lots, "").is_none());
    assert!(pick(&lots, "   ").is_none());
}

#[test]
fn preview_not_found_placeholders() {
    let lots = sample_lots();
    let p = preview(&lots, "nothing-here");
    assert_eq!(p, FefoPreview::not_found());
    assert_eq!(p.produit, "Non trouvé");
    assert_eq!(p.entree, "-");
    assert_eq!(p.peremption, "-");
}

#[test]
fn preview_shows_winner_fields() {
    let lots = sample_lots();
    let p = preview(&lots, "REF-A");
    assert_eq!(p.produit, "Produit REF-A");
    assert_eq!(p.entree, "2023-12-01");
    assert_eq!(p.peremption, "2024-01-05");
}

#[test]
fn cli_fefo_prints_earliest_expiry() {
    let db_path = setup_test_db("cli_fefo_hit");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "fefo", "REF-A"])
        .assert()
        .success()
        .stdout(contains("Paracétamol"))
        .stdout(contains("2099-01-10"));
}

#[test]
fn cli_fefo_expired_only_stock_prints_not_found() {
    let db_path = setup_test_db("cli_fefo_expired_only");
    init_db_with_data(&db_path);

    // REF-B's only lot expired in 2020: no eligible candidate remains.
    lk().args(["--db", &db_path, "--test", "fefo", "REF-B"])
        .assert()
        .success()
        .stdout(contains("Non trouvé"))
        .stdout(contains("Ibuprofène").not());
}

#[test]
fn cli_fefo_unknown_code_prints_placeholders() {
    let db_path = setup_test_db("cli_fefo_miss");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "fefo", "NOPE"])
        .assert()
        .success()
        .stdout(contains("Non trouvé"));
}
