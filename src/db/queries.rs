use crate::core::alerts::ProductWithLots;
use crate::core::lookup::ProductRef;
use crate::errors::{AppError, AppResult};
use crate::models::family::Family;
use crate::models::lot::Lot;
use crate::models::movement::Movement;
use crate::models::product::Product;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Row mappers
// ---------------------------------------------------------------------------

fn parse_db_date(col: &str, s: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(format!("{col}: {s}"))),
        )
    })
}

pub fn map_product_row(row: &Row) -> Result<Product> {
    Ok(Product {
        id: row.get("id")?,
        reference: row.get("reference")?,
        nom: row.get("nom")?,
        barcode: row.get("barcode")?,
        famille_id: row.get("famille_id")?,
        famille: row.get("famille")?,
        nbr_days_alert: row.get("nbr_days_alert")?,
        nbr_qnt_alert: row.get("nbr_qnt_alert")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_lot_row(row: &Row) -> Result<Lot> {
    let entree: String = row.get("date_entree")?;
    let fin: String = row.get("date_fin")?;

    Ok(Lot {
        id: row.get("id")?,
        produit_id: row.get("produit_id")?,
        quantite: row.get("quantite")?,
        date_entree: parse_db_date("date_entree", entree)?,
        date_fin: parse_db_date("date_fin", fin)?,
        created_at: row.get("created_at")?,
        reference: row.get("reference")?,
        barcode: row.get("barcode")?,
        produit_nom: row.get("nom")?,
        nbr_days_alert: row.get("nbr_days_alert")?,
    })
}

// ---------------------------------------------------------------------------
// Familles
// ---------------------------------------------------------------------------

pub fn list_families(conn: &Connection) -> AppResult<Vec<Family>> {
    let mut stmt = conn.prepare("SELECT id, nom FROM familles ORDER BY nom ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Family {
            id: row.get(0)?,
            nom: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_family_by_name(conn: &Connection, nom: &str) -> AppResult<Option<Family>> {
    let mut stmt =
        conn.prepare("SELECT id, nom FROM familles WHERE nom = ?1 COLLATE NOCASE LIMIT 1")?;
    let fam = stmt
        .query_row([nom.trim()], |row| {
            Ok(Family {
                id: row.get(0)?,
                nom: row.get(1)?,
            })
        })
        .optional()?;
    Ok(fam)
}

pub fn insert_family(conn: &Connection, nom: &str) -> AppResult<i64> {
    let nom = nom.trim();
    if nom.is_empty() {
        return Err(AppError::Other("family name must not be empty".into()));
    }
    conn.execute("INSERT INTO familles (nom) VALUES (?1)", [nom])?;
    Ok(conn.last_insert_rowid())
}

pub fn rename_family(conn: &Connection, id: i64, new_name: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE familles SET nom = ?1 WHERE id = ?2",
        params![new_name.trim(), id],
    )?;
    Ok(())
}

pub fn family_product_count(conn: &Connection, id: i64) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM produits WHERE famille_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Move every product of `from` to the fallback family, then delete `from`.
pub fn delete_family_move_products(conn: &Connection, from: i64, fallback: i64) -> AppResult<i64> {
    let moved = conn.execute(
        "UPDATE produits SET famille_id = ?1 WHERE famille_id = ?2",
        params![fallback, from],
    )?;
    conn.execute("DELETE FROM familles WHERE id = ?1", [from])?;
    Ok(moved as i64)
}

/// Delete a family together with its products (lots cascade).
pub fn delete_family_with_products(conn: &Connection, id: i64) -> AppResult<i64> {
    let deleted = conn.execute("DELETE FROM produits WHERE famille_id = ?1", [id])?;
    conn.execute("DELETE FROM familles WHERE id = ?1", [id])?;
    Ok(deleted as i64)
}

// ---------------------------------------------------------------------------
// Produits
// ---------------------------------------------------------------------------

const PRODUCT_SELECT: &str = "SELECT p.id, p.reference, p.nom, p.barcode, p.famille_id,
        f.nom AS famille, p.nbr_days_alert, p.nbr_qnt_alert, p.created_at
     FROM produits p
     JOIN familles f ON f.id = p.famille_id";

pub fn insert_product(conn: &Connection, p: &Product) -> AppResult<i64> {
    let dup_ref: Option<i64> = conn
        .query_row(
            "SELECT id FROM produits WHERE reference = ?1 COLLATE NOCASE",
            [&p.reference],
            |row| row.get(0),
        )
        .optional()?;
    if dup_ref.is_some() {
        return Err(AppError::DuplicateReference(p.reference.clone()));
    }

    let dup_bc: Option<i64> = conn
        .query_row(
            "SELECT id FROM produits WHERE barcode = ?1 COLLATE NOCASE",
            [&p.barcode],
            |row| row.get(0),
        )
        .optional()?;
    if dup_bc.is_some() {
        return Err(AppError::DuplicateBarcode(p.barcode.clone()));
    }

    conn.execute(
        "INSERT INTO produits (reference, nom, barcode, famille_id, nbr_days_alert, nbr_qnt_alert, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            p.reference,
            p.nom,
            p.barcode,
            p.famille_id,
            p.nbr_days_alert,
            p.nbr_qnt_alert,
            p.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Resolve a product by reference or barcode, case-insensitive exact match.
pub fn find_product_by_code(conn: &Connection, code: &str) -> AppResult<Option<Product>> {
    let sql = format!(
        "{PRODUCT_SELECT}
         WHERE p.reference = ?1 COLLATE NOCASE OR p.barcode = ?1 COLLATE NOCASE
         LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let product = stmt.query_row([code.trim()], map_product_row).optional()?;
    Ok(product)
}

/// Persist edited product fields. The reference itself is immutable; the
/// barcode is re-checked for uniqueness against every other product.
pub fn update_product(conn: &Connection, p: &Product) -> AppResult<()> {
    let dup_bc: Option<i64> = conn
        .query_row(
            "SELECT id FROM produits WHERE barcode = ?1 COLLATE NOCASE AND id != ?2",
            params![p.barcode, p.id],
            |row| row.get(0),
        )
        .optional()?;
    if dup_bc.is_some() {
        return Err(AppError::DuplicateBarcode(p.barcode.clone()));
    }

    conn.execute(
        "UPDATE produits
         SET nom = ?1, barcode = ?2, famille_id = ?3, nbr_days_alert = ?4, nbr_qnt_alert = ?5
         WHERE id = ?6",
        params![
            p.nom,
            p.barcode,
            p.famille_id,
            p.nbr_days_alert,
            p.nbr_qnt_alert,
            p.id,
        ],
    )?;
    Ok(())
}

pub fn delete_product(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM produits WHERE id = ?1", [id])?;
    Ok(())
}

pub fn product_lot_count(conn: &Connection, id: i64) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM lots WHERE produit_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Every product joined with its stock total and its lots in FEFO order.
/// Family and text filters are applied in memory by the callers.
pub fn load_products_with_lots(conn: &Connection) -> AppResult<Vec<ProductWithLots>> {
    let mut products = Vec::new();

    let sql = format!("{PRODUCT_SELECT} ORDER BY p.reference ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_product_row)?;
    for r in rows {
        products.push(r?);
    }

    let mut out = Vec::new();
    for product in products {
        let lots = lots_for_product(conn, product.id)?;
        let stock_total = lots.iter().map(|l| l.quantite).sum();
        out.push(ProductWithLots {
            product,
            stock_total,
            lots,
        });
    }
    Ok(out)
}

/// The product map consumed by the lookup feature, in insertion order.
pub fn load_product_map(conn: &Connection) -> AppResult<Vec<ProductRef>> {
    let mut stmt = conn.prepare(
        "SELECT id, IFNULL(nom, ''), reference, barcode FROM produits ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ProductRef {
            id: row.get(0)?,
            nom: row.get(1)?,
            reference: row.get(2)?,
            barcode: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Lots
// ---------------------------------------------------------------------------

const LOT_SELECT: &str = "SELECT l.id, l.produit_id, l.quantite, l.date_entree, l.date_fin,
        l.created_at, p.reference, p.barcode, p.nom, p.nbr_days_alert
     FROM lots l
     JOIN produits p ON p.id = l.produit_id";

pub fn insert_lot(conn: &Connection, lot: &Lot) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO lots (produit_id, quantite, date_entree, date_fin, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            lot.produit_id,
            lot.quantite,
            lot.entree_str(),
            lot.fin_str(),
            lot.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All lots in FEFO order (date_fin ASC, insertion order for ties).
pub fn load_lots(conn: &Connection) -> AppResult<Vec<Lot>> {
    let sql = format!("{LOT_SELECT} ORDER BY l.date_fin ASC, l.id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_lot_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Lots still sellable today: in stock and not expired, FEFO order.
/// This is what the movement screen's FEFO preview works from.
pub fn load_current_lots(conn: &Connection, today: NaiveDate) -> AppResult<Vec<Lot>> {
    let sql = format!(
        "{LOT_SELECT}
         WHERE l.quantite > 0 AND l.date_fin >= ?1
         ORDER BY l.date_fin ASC, l.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([today.format("%Y-%m-%d").to_string()], map_lot_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Lots of one product in FEFO order (used for stock totals and alerts).
pub fn lots_for_product(conn: &Connection, produit_id: i64) -> AppResult<Vec<Lot>> {
    let sql = format!(
        "{LOT_SELECT} WHERE l.produit_id = ?1 ORDER BY l.date_fin ASC, l.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([produit_id], map_lot_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Lots eligible for a withdrawal: in stock and not expired, FEFO order.
pub fn eligible_lots(conn: &Connection, produit_id: i64, today: NaiveDate) -> AppResult<Vec<Lot>> {
    let sql = format!(
        "{LOT_SELECT}
         WHERE l.produit_id = ?1 AND l.quantite > 0 AND l.date_fin >= ?2
         ORDER BY l.date_fin ASC, l.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![produit_id, today.format("%Y-%m-%d").to_string()],
        map_lot_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_lot_by_id(conn: &Connection, id: i64) -> AppResult<Option<Lot>> {
    let sql = format!("{LOT_SELECT} WHERE l.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let lot = stmt.query_row([id], map_lot_row).optional()?;
    Ok(lot)
}

pub fn delete_lot(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM lots WHERE id = ?1", [id])?;
    Ok(())
}

pub fn update_lot_quantity(conn: &Connection, lot_id: i64, quantite: u32) -> AppResult<()> {
    conn.execute(
        "UPDATE lots SET quantite = ?1 WHERE id = ?2",
        params![quantite, lot_id],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Sorties
// ---------------------------------------------------------------------------

pub fn insert_movement(
    conn: &Connection,
    produit_id: i64,
    quantite: u32,
    date_sortie: NaiveDate,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sorties (produit_id, quantite, date_sortie) VALUES (?1, ?2, ?3)",
        params![
            produit_id,
            quantite,
            date_sortie.format("%Y-%m-%d").to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent stock-out movements, newest first.
pub fn load_movements(conn: &Connection, limit: usize) -> AppResult<Vec<Movement>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.produit_id, p.reference, s.quantite, s.date_sortie
         FROM sorties s
         JOIN produits p ON p.id = s.produit_id
         ORDER BY s.date_sortie DESC, s.id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit as i64], |row| {
        let date: String = row.get(4)?;
        Ok(Movement {
            id: row.get(0)?,
            produit_id: row.get(1)?,
            reference: row.get(2)?,
            quantite: row.get(3)?,
            date_sortie: parse_db_date("date_sortie", date)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
