use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_family, add_lot, add_product, init_db_with_data, init_test_db, lk, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");

    lk().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    // idempotent: a second init does not fail
    lk().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("db_check_info");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));

    lk().args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Produits"))
        .stdout(contains("Lots"));
}

#[test]
fn test_family_add_list() {
    let db_path = setup_test_db("family_add_list");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgiques");
    add_family(&db_path, "Vitamines");

    lk().args(["--db", &db_path, "--test", "family", "list"])
        .assert()
        .success()
        .stdout(contains("Antalgiques"))
        .stdout(contains("Vitamines"))
        .stdout(contains("-")); // fallback family always present
}

#[test]
fn test_family_duplicate_rejected() {
    let db_path = setup_test_db("family_dup");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgiques");

    lk().args(["--db", &db_path, "--test", "family", "add", "antalgiques"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_family_delete_moves_products_to_fallback() {
    let db_path = setup_test_db("family_del_move");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgiques");
    add_product(&db_path, "REF-A", "34000000000001", "Paracétamol", "Antalgiques");

    lk().args(["--db", &db_path, "--test", "family", "del", "Antalgiques"])
        .assert()
        .success()
        .stdout(contains("déplacé(s)"));

    // the product survived, now under the fallback family
    lk().args(["--db", &db_path, "--test", "product", "list"])
        .assert()
        .success()
        .stdout(contains("REF-A"));

    lk().args(["--db", &db_path, "--test", "family", "list"])
        .assert()
        .success()
        .stdout(contains("Antalgiques").not());
}

#[test]
fn test_family_delete_with_products() {
    let db_path = setup_test_db("family_del_all");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgiques");
    add_product(&db_path, "REF-A", "34000000000001", "Paracétamol", "Antalgiques");

    lk().args([
        "--db", &db_path, "--test", "family", "del", "Antalgiques", "--with-products",
    ])
    .assert()
    .success()
    .stdout(contains("supprimé(s)"));

    lk().args(["--db", &db_path, "--test", "product", "list"])
        .assert()
        .success()
        .stdout(contains("REF-A").not());
}

#[test]
fn test_family_rename() {
    let db_path = setup_test_db("family_rename");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgique");

    lk().args([
        "--db", &db_path, "--test", "family", "rename", "Antalgique", "Antalgiques",
    ])
    .assert()
    .success();

    lk().args(["--db", &db_path, "--test", "family", "list"])
        .assert()
        .success()
        .stdout(contains("Antalgiques"));
}

#[test]
fn test_fallback_family_cannot_be_deleted() {
    let db_path = setup_test_db("family_fallback_guard");
    init_test_db(&db_path);

    lk().args(["--db", &db_path, "--test", "family", "del", "-"])
        .assert()
        .failure()
        .stderr(contains("cannot be deleted"));
}

#[test]
fn test_product_add_duplicate_reference_rejected() {
    let db_path = setup_test_db("product_dup_ref");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgiques");
    add_product(&db_path, "REF-A", "34000000000001", "Paracétamol", "Antalgiques");

    lk().args([
        "--db", &db_path, "--test", "product", "add", "ref-a", "34000000000009",
    ])
    .assert()
    .failure()
    .stderr(contains("Référence déjà utilisée"));
}

#[test]
fn test_product_add_duplicate_barcode_rejected() {
    let db_path = setup_test_db("product_dup_bc");
    init_test_db(&db_path);

    add_family(&db_path, "Antalgiques");
    add_product(&db_path, "REF-A", "34000000000001", "Paracétamol", "Antalgiques");

    lk().args([
        "--db", &db_path, "--test", "product", "add", "REF-B", "34000000000001",
    ])
    .assert()
    .failure()
    .stderr(contains("Code-barres déjà utilisé"));
}

#[test]
fn test_product_add_invalid_barcode_rejected() {
    let db_path = setup_test_db("product_bad_barcode");
    init_test_db(&db_path);

    for bad in ["1234567", "123456789012345", "12AB5678"] {
        lk().args(["--db", &db_path, "--test", "product", "add", "REF-X", bad])
            .assert()
            .failure()
            .stderr(contains("Invalid barcode"));
    }
}

#[test]
fn test_product_add_unknown_family_rejected() {
    let db_path = setup_test_db("product_bad_family");
    init_test_db(&db_path);

    lk().args([
        "--db", &db_path, "--test", "product", "add", "REF-X", "34000000000001",
        "--famille", "Inconnue",
    ])
    .assert()
    .failure()
    .stderr(contains("Famille introuvable"));
}

#[test]
fn test_product_list_search_and_sort() {
    let db_path = setup_test_db("product_list_search");
    init_db_with_data(&db_path);

    lk().args([
        "--db", &db_path, "--test", "product", "list", "--search", "ibupro",
    ])
    .assert()
    .success()
    .stdout(contains("REF-B"))
    .stdout(contains("REF-A").not());

    lk().args(["--db", &db_path, "--test", "product", "list", "--sort", "qty"])
        .assert()
        .success()
        .stdout(contains("REF-A"))
        .stdout(contains("REF-B"));
}

#[test]
fn test_product_list_family_filter_is_exact() {
    let db_path = setup_test_db("product_family_filter");
    init_db_with_data(&db_path);

    add_family(&db_path, "Vitamines");
    add_product(&db_path, "REF-C", "34000000000003", "Vitamine C", "Vitamines");

    lk().args([
        "--db", &db_path, "--test", "product", "list", "--famille", "vitamines",
    ])
    .assert()
    .success()
    .stdout(contains("REF-C"))
    .stdout(contains("REF-A").not());

    // prefixes do not match: the filter is exact
    lk().args([
        "--db", &db_path, "--test", "product", "list", "--famille", "Vita",
    ])
    .assert()
    .success()
    .stdout(contains("No product matches"));
}

#[test]
fn test_product_edit_updates_fields() {
    let db_path = setup_test_db("product_edit");
    init_db_with_data(&db_path);

    add_family(&db_path, "Vitamines");

    lk().args([
        "--db", &db_path, "--test", "product", "edit", "REF-A",
        "--nom", "Paracétamol 500mg", "--famille", "Vitamines",
    ])
    .assert()
    .success()
    .stdout(contains("Produit modifié avec succès"));

    lk().args([
        "--db", &db_path, "--test", "product", "list", "--famille", "Vitamines",
    ])
    .assert()
    .success()
    .stdout(contains("Paracétamol 500mg"))
    .stdout(contains("REF-B").not());
}

#[test]
fn test_product_edit_duplicate_barcode_rejected() {
    let db_path = setup_test_db("product_edit_dup_barcode");
    init_db_with_data(&db_path);

    // REF-B's barcode is taken
    lk().args([
        "--db", &db_path, "--test", "product", "edit", "REF-A",
        "--barcode", "34000000000002",
    ])
    .assert()
    .failure()
    .stderr(contains("Code-barres déjà utilisé"));

    // re-saving a product's own barcode is fine
    lk().args([
        "--db", &db_path, "--test", "product", "edit", "REF-A",
        "--barcode", "34000000000001",
    ])
    .assert()
    .success();
}

#[test]
fn test_product_edit_unknown_product() {
    let db_path = setup_test_db("product_edit_unknown");
    init_db_with_data(&db_path);

    lk().args([
        "--db", &db_path, "--test", "product", "edit", "REF-Z", "--nom", "X",
    ])
    .assert()
    .failure()
    .stderr(contains("Produit introuvable"));
}

#[test]
fn test_product_delete_removes_lots() {
    let db_path = setup_test_db("product_del");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "product", "del", "REF-A"])
        .assert()
        .success()
        .stdout(contains("2 lot(s)"));

    lk().args(["--db", &db_path, "--test", "lot", "list", "--search", "REF-A"])
        .assert()
        .success()
        .stdout(contains("No lot matches"));
}

#[test]
fn test_lot_add_rejects_bad_dates() {
    let db_path = setup_test_db("lot_bad_dates");
    init_db_with_data(&db_path);

    lk().args([
        "--db", &db_path, "--test", "lot", "add", "REF-A", "3", "--fin", "not-a-date",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date"));

    // expiry before entry
    lk().args([
        "--db", &db_path, "--test", "lot", "add", "REF-A", "3", "--fin", "2025-01-01",
        "--entree", "2025-06-01",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date"));
}

#[test]
fn test_lot_del_purges_expired_lot() {
    let db_path = setup_test_db("lot_del_expired");
    init_db_with_data(&db_path);

    // lot #3 is REF-B's 2020 lot
    lk().args(["--db", &db_path, "--test", "lot", "del", "3"])
        .assert()
        .success()
        .stdout(contains("Lot expiré supprimé pour le produit REF-B"));

    lk().args(["--db", &db_path, "--test", "lot", "list"])
        .assert()
        .success()
        .stdout(contains("2020-01-01").not());
}

#[test]
fn test_lot_del_rejects_unexpired_lot() {
    let db_path = setup_test_db("lot_del_unexpired");
    init_db_with_data(&db_path);

    // lot #1 expires in 2099: still live stock
    lk().args(["--db", &db_path, "--test", "lot", "del", "1"])
        .assert()
        .failure()
        .stderr(contains("seuls les lots expirés"));

    lk().args(["--db", &db_path, "--test", "lot", "list"])
        .assert()
        .success()
        .stdout(contains("2099-01-10"));
}

#[test]
fn test_lot_del_unknown_id() {
    let db_path = setup_test_db("lot_del_unknown");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "lot", "del", "99"])
        .assert()
        .failure()
        .stderr(contains("lot introuvable"));
}

#[test]
fn test_lot_list_level_filter() {
    let db_path = setup_test_db("lot_level_filter");
    init_db_with_data(&db_path);

    // only the expired REF-B lot is danger
    lk().args(["--db", &db_path, "--test", "lot", "list", "--level", "danger"])
        .assert()
        .success()
        .stdout(contains("REF-B"))
        .stdout(contains("REF-A").not());

    lk().args(["--db", &db_path, "--test", "lot", "list", "--level", "bogus"])
        .assert()
        .failure()
        .stderr(contains("Invalid alert level"));
}

#[test]
fn test_lot_list_search_then_sort() {
    let db_path = setup_test_db("lot_search_sort");
    init_db_with_data(&db_path);

    lk().args([
        "--db", &db_path, "--test", "lot", "list", "--search", "ref-a", "--sort", "qty",
    ])
    .assert()
    .success()
    .stdout(contains("REF-A"))
    .stdout(contains("REF-B").not());
}

#[test]
fn test_lot_list_panel_flag_shows_summary() {
    let db_path = setup_test_db("lot_panel");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "lot", "list", "--panel"])
        .assert()
        .success()
        .stdout(contains("Résumé"))
        .stdout(contains("Lots visibles : 3"));

    // without the flag (and default config) the panel stays hidden
    lk().args(["--db", &db_path, "--test", "lot", "list"])
        .assert()
        .success()
        .stdout(contains("Résumé").not());
}

#[test]
fn test_config_toggle_panel_in_test_mode() {
    let db_path = setup_test_db("config_toggle_panel");
    init_test_db(&db_path);

    // test mode never persists, so the toggle always starts from the
    // default closed state
    lk().args(["--db", &db_path, "--test", "config", "--toggle-panel"])
        .assert()
        .success()
        .stdout(contains("Summary panel: open"));

    lk().args(["--db", &db_path, "--test", "config", "--toggle-panel"])
        .assert()
        .success()
        .stdout(contains("Summary panel: open"));
}

#[test]
fn test_seed_is_deterministic_and_counted() {
    let db_path = setup_test_db("seed_counts");
    init_test_db(&db_path);

    lk().args([
        "--db", &db_path, "--test", "seed", "--familles", "2", "--produits", "3",
        "--lots", "5", "--sorts", "2",
    ])
    .assert()
    .success()
    .stdout(contains("3 produits"))
    .stdout(contains("5 lots"));

    lk().args(["--db", &db_path, "--test", "product", "list"])
        .assert()
        .success()
        .stdout(contains("REF-0001"))
        .stdout(contains("REF-0003"));
}

#[test]
fn test_seed_reset_clears_previous_data() {
    let db_path = setup_test_db("seed_reset");
    init_db_with_data(&db_path);

    lk().args([
        "--db", &db_path, "--test", "seed", "--familles", "1", "--produits", "2",
        "--lots", "2", "--sorts", "0", "--reset",
    ])
    .assert()
    .success();

    lk().args(["--db", &db_path, "--test", "product", "list"])
        .assert()
        .success()
        .stdout(contains("REF-0001"))
        .stdout(contains("REF-A").not());
}

#[test]
fn test_dashboard_counters() {
    let db_path = setup_test_db("dashboard");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "dashboard"])
        .assert()
        .success()
        .stdout(contains("Tableau de bord"))
        .stdout(contains("Produits           : 2"))
        .stdout(contains("Lots expirés       : 1"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records");
    init_db_with_data(&db_path);

    lk().args(["--db", &db_path, "--test", "out", "REF-A", "1"])
        .assert()
        .success();

    lk().args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"))
        .stdout(contains("out"));
}
