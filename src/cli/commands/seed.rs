use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::movement::plan_withdrawal;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::AppResult;
use crate::models::family::FALLBACK_FAMILY;
use crate::models::lot::Lot;
use crate::models::product::Product;
use crate::ui::messages::{success, warning};
use crate::utils::date;
use chrono::Duration;

const FAMILY_NAMES: &[&str] = &[
    "Antalgiques",
    "Antibiotiques",
    "Vitamines",
    "Dermatologie",
    "Cardiologie",
    "Ophtalmologie",
    "Pédiatrie",
    "Gastro-entérologie",
    "Allergologie",
    "Premiers secours",
];

const PRODUCT_NAMES: &[&str] = &[
    "Paracétamol 500mg",
    "Ibuprofène 200mg",
    "Amoxicilline 1g",
    "Vitamine C 1000",
    "Crème hydratante",
    "Aspirine 100mg",
    "Sérum physiologique",
    "Collyre apaisant",
    "Sirop antitussif",
    "Pansements stériles",
];

/// Populate the database with deterministic demo data. Re-running with the
/// same arguments on an empty database always produces the same rows, so
/// tests can assert on the output.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Seed {
        familles,
        produits,
        lots,
        sorts,
        reset,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let today = date::today();

    if *reset {
        let tx = pool.conn.transaction()?;
        tx.execute("DELETE FROM sorties", [])?;
        tx.execute("DELETE FROM lots", [])?;
        tx.execute("DELETE FROM produits", [])?;
        tx.execute("DELETE FROM familles", [])?;
        tx.execute(
            "INSERT OR IGNORE INTO familles (nom) VALUES (?1)",
            [FALLBACK_FAMILY],
        )?;
        tx.commit()?;
        warning("Existing data deleted (--reset).");
    }

    let conn = &pool.conn;

    // Familles: cycle through the fixed name list, suffixing on wrap.
    let mut family_ids = Vec::new();
    for i in 0..*familles {
        let base = FAMILY_NAMES[i as usize % FAMILY_NAMES.len()];
        let nom = if (i as usize) < FAMILY_NAMES.len() {
            base.to_string()
        } else {
            format!("{} {}", base, i as usize / FAMILY_NAMES.len() + 1)
        };
        let id = match queries::find_family_by_name(conn, &nom)? {
            Some(f) => f.id,
            None => queries::insert_family(conn, &nom)?,
        };
        family_ids.push(id);
    }

    // With --familles 0, products land in the fallback family.
    if family_ids.is_empty() && *produits > 0 {
        let id = match queries::find_family_by_name(conn, FALLBACK_FAMILY)? {
            Some(f) => f.id,
            None => queries::insert_family(conn, FALLBACK_FAMILY)?,
        };
        family_ids.push(id);
    }

    // Produits: round-robin over the seeded familles, EAN-13-shaped barcodes.
    let mut product_ids = Vec::new();
    for i in 0..*produits {
        let reference = format!("REF-{:04}", i + 1);
        if let Some(existing) = queries::find_product_by_code(conn, &reference)? {
            product_ids.push(existing.id);
            continue;
        }

        let famille_id = family_ids[i as usize % family_ids.len()];
        let nom = PRODUCT_NAMES[i as usize % PRODUCT_NAMES.len()];
        let product = Product::new(
            0,
            reference,
            Some(format!("{} #{}", nom, i + 1)),
            format!("{:013}", 3_400_000_000_000u64 + u64::from(i)),
            famille_id,
            String::new(),
            cfg.default_days_alert + (i % 3) * 15,
            cfg.default_qnt_alert + i % 5,
        );
        product_ids.push(queries::insert_product(conn, &product)?);
    }

    // Lots: expiry offsets sweep from already-expired to far future, so
    // every alert level shows up in the listings.
    let lot_target = if product_ids.is_empty() { 0 } else { *lots };
    let mut lot_count = 0u32;
    for i in 0..lot_target {
        let produit_id = product_ids[i as usize % product_ids.len()];
        let offset_days = i64::from(i) * 11 % 120 - 10;
        let fin = today + Duration::days(offset_days);
        let entree = fin - Duration::days(30 + i64::from(i % 60));
        let quantite = i * 7 % 25 + 1;

        let lot = Lot::new(produit_id, quantite, entree, fin);
        queries::insert_lot(conn, &lot)?;
        lot_count += 1;
    }

    // Sorties: FEFO withdrawals of one or two units where stock allows.
    let sort_target = if product_ids.is_empty() { 0 } else { *sorts };
    let mut sort_count = 0u32;
    for i in 0..sort_target {
        let produit_id = product_ids[i as usize % product_ids.len()];
        let qty = i % 2 + 1;

        let eligible = queries::eligible_lots(conn, produit_id, today)?;
        let Ok(plan) = plan_withdrawal(&eligible, qty) else {
            continue;
        };
        for step in &plan {
            queries::update_lot_quantity(conn, step.lot_id, step.remaining)?;
        }
        queries::insert_movement(conn, produit_id, qty, today)?;
        sort_count += 1;
    }

    let _ = log::audit(
        conn,
        "seed",
        "database",
        &format!(
            "{} familles, {} produits, {} lots, {} sorties",
            family_ids.len(),
            product_ids.len(),
            lot_count,
            sort_count
        ),
    );

    success(format!(
        "Demo data: {} familles, {} produits, {} lots, {} sorties",
        family_ids.len(),
        product_ids.len(),
        lot_count,
        sort_count
    ));

    Ok(())
}
