use crate::core::alerts::lot_expiry_status;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::LotExport;
use crate::ui::messages::warning;
use crate::utils::date;
use rusqlite::Row;
use std::io;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export every lot, FEFO order, to `file` in the requested format.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let lots = load_export_rows(pool)?;

        if lots.is_empty() {
            warning("No lots found to export.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&lots, path)?,
            ExportFormat::Json => export_json(&lots, path)?,
        }

        Ok(())
    }
}

/// Load lots joined with product and family, plus the computed alert level.
fn load_export_rows(pool: &mut DbPool) -> AppResult<Vec<LotExport>> {
    let conn = &mut pool.conn;
    let today = date::today();

    let mut stmt = conn.prepare(
        "SELECT l.id, IFNULL(p.nom, '-'), p.reference, p.barcode, f.nom,
                l.quantite, l.date_entree, l.date_fin, p.nbr_days_alert
         FROM lots l
         JOIN produits p ON p.id = l.produit_id
         JOIN familles f ON f.id = p.famille_id
         ORDER BY l.date_fin ASC, l.id ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        let (mut lot, alert_days) = r?;
        // niveau depends on today's date, so it is filled outside the mapper
        if let Some(fin) = date::parse_date(&lot.date_fin) {
            let (level, _) = lot_expiry_status(date::days_left(fin, today), alert_days);
            lot.niveau = level.as_str().to_string();
        }
        out.push(lot);
    }

    Ok(out)
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<(LotExport, u32)> {
    let lot = LotExport {
        id: row.get(0)?,
        produit: row.get(1)?,
        reference: row.get(2)?,
        barcode: row.get(3)?,
        famille: row.get(4)?,
        quantite: row.get(5)?,
        date_entree: row.get(6)?,
        date_fin: row.get(7)?,
        niveau: String::new(),
    };
    let alert_days: u32 = row.get(8)?;
    Ok((lot, alert_days))
}
