use chrono::NaiveDate;
use lotkeeper::core::movement::{Deduction, plan_withdrawal};
use lotkeeper::errors::AppError;
use lotkeeper::models::lot::Lot;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, lk, setup_test_db};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn lot(id: i64, qty: u32, fin: &str) -> Lot {
    let mut l = Lot::new(1, qty, d("2025-01-01"), d(fin));
    l.id = id;
    l
}

#[test]
fn withdrawal_spans_lots_in_fefo_order() {
    let lots = vec![lot(1, 2, "2025-06-01"), lot(2, 5, "2025-07-01")];
    let plan = plan_withdrawal(&lots, 3).unwrap();
    assert_eq!(
        plan,
        vec![
            Deduction {
                lot_id: 1,
                taken: 2,
                remaining: 0
            },
            Deduction {
                lot_id: 2,
                taken: 1,
                remaining: 4
            },
        ]
    );
}

#[test]
fn withdrawal_single_lot_when_it_suffices() {
    let lots = vec![lot(1, 5, "2025-06-01"), lot(2, 5, "2025-07-01")];
    let plan = plan_withdrawal(&lots, 5).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].remaining, 0);
}

#[test]
fn withdrawal_is_all_or_nothing() {
    let lots = vec![lot(1, 2, "2025-06-01"), lot(2, 1, "2025-07-01")];
    let err = plan_withdrawal(&lots, 4).unwrap_err();
    match err {
        AppError::InsufficientStock {
            requested,
            available,
        } => {
            assert_eq!(requested, 4);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_request_is_an_empty_plan() {
    let lots = vec![lot(1, 2, "2025-06-01")];
    assert!(plan_withdrawal(&lots, 0).unwrap().is_empty());
}

#[test]
fn cli_out_deducts_earliest_lot_first() {
    let db_path = setup_test_db("cli_out_fefo");
    init_db_with_data(&db_path);

    // REF-A holds 2 units expiring 2099-01-10 and 5 expiring 2099-03-01:
    // a withdrawal of 3 empties the first lot and takes 1 from the second.
    lk().args(["--db", &db_path, "--test", "out", "REF-A", "3"])
        .assert()
        .success()
        .stdout(contains("Sortie de stock: REF-A x3"))
        .stdout(contains("reste 0"))
        .stdout(contains("reste 4"));
}

#[test]
fn cli_out_insufficient_stock_fails_and_keeps_stock() {
    let db_path = setup_test_db("cli_out_insufficient");
    init_db_with_data(&db_path);

    // REF-B only has an expired lot: nothing is eligible.
    lk().args(["--db", &db_path, "--test", "out", "REF-B", "1"])
        .assert()
        .failure()
        .stderr(contains("quantité insuffisante"));

    // the expired lot's quantity is untouched
    lk().args(["--db", &db_path, "--test", "lot", "list", "--search", "REF-B"])
        .assert()
        .success()
        .stdout(contains("7"));
}

#[test]
fn cli_out_unknown_product_fails() {
    let db_path = setup_test_db("cli_out_unknown");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "out", "NOPE", "1"])
        .assert()
        .failure()
        .stderr(contains("Produit introuvable"));
}

#[test]
fn cli_out_history_lists_movements() {
    let db_path = setup_test_db("cli_out_history");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "out", "REF-A", "2"])
        .assert()
        .success();

    lk().args(["--db", &db_path, "--test", "out", "--history"])
        .assert()
        .success()
        .stdout(contains("REF-A"));
}
