//! Schema creation and upgrades. All schema is owned here; init_db only
//! delegates to run_pending_migrations.

use crate::models::family::FALLBACK_FAMILY;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn produits_has_nom_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('produits')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "nom" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the inventory tables with the modern schema.
fn create_inventory_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS familles (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            nom  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS produits (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            reference      TEXT NOT NULL UNIQUE,
            nom            TEXT,
            barcode        TEXT NOT NULL UNIQUE,
            famille_id     INTEGER NOT NULL REFERENCES familles(id),
            nbr_days_alert INTEGER NOT NULL DEFAULT 30,
            nbr_qnt_alert  INTEGER NOT NULL DEFAULT 1,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS lots (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            produit_id  INTEGER NOT NULL REFERENCES produits(id) ON DELETE CASCADE,
            quantite    INTEGER NOT NULL CHECK(quantite >= 0),
            date_entree TEXT NOT NULL,
            date_fin    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sorties (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            produit_id  INTEGER NOT NULL REFERENCES produits(id) ON DELETE CASCADE,
            quantite    INTEGER NOT NULL CHECK(quantite > 0),
            date_sortie TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_lots_produit_fin ON lots(produit_id, date_fin);
        CREATE INDEX IF NOT EXISTS idx_lots_fin ON lots(date_fin);
        CREATE INDEX IF NOT EXISTS idx_produits_barcode ON produits(barcode);
        CREATE INDEX IF NOT EXISTS idx_sorties_date ON sorties(date_sortie);
        "#,
    )?;
    Ok(())
}

/// Early databases stored products without a display name. Add the column
/// once and mark the migration in the log table.
fn migrate_add_nom_to_produits(conn: &Connection) -> Result<()> {
    let version = "20250601_0007_add_nom_to_produits";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !produits_has_nom_column(conn)? {
        conn.execute("ALTER TABLE produits ADD COLUMN nom TEXT;", [])?;
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added nom column to produits')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'nom' to produits table",
        version
    ));

    Ok(())
}

/// The fallback family collects products whose own family is deleted.
fn ensure_fallback_family(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO familles (nom) VALUES (?1)",
        [FALLBACK_FAMILY],
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create inventory tables when missing
    let fresh = !table_exists(conn, "produits")?;
    create_inventory_tables(conn)?;
    if fresh {
        success("Created inventory tables (modern schema).");
    } else {
        migrate_add_nom_to_produits(conn)?;
    }

    // 3) Seed the fallback family
    ensure_fallback_family(conn)?;

    Ok(())
}
