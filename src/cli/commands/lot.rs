use crate::cli::parser::{Commands, LotCmd};
use crate::config::Config;
use crate::core::alerts::lot_expiry_status;
use crate::core::view::{Row, TableView};
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::alert_level::AlertLevel;
use crate::models::lot::Lot;
use crate::ui::messages::{info, success, warning};
use crate::ui::render::{render_summary_panel, render_with_levels};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Lot { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        LotCmd::Add {
            code,
            quantite,
            date_fin,
            date_entree,
        } => {
            let product = queries::find_product_by_code(conn, code)?
                .ok_or_else(|| AppError::ProductNotFound(code.clone()))?;

            let fin = date::parse_date(date_fin)
                .ok_or_else(|| AppError::InvalidDate(date_fin.clone()))?;
            let entree = match date_entree {
                Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => date::today(),
            };

            if fin < entree {
                return Err(AppError::InvalidDate(format!(
                    "expiry {} before entry {}",
                    date::fmt_date(fin),
                    date::fmt_date(entree)
                )));
            }

            let lot = Lot::new(product.id, *quantite, entree, fin);
            let id = queries::insert_lot(conn, &lot)?;

            let _ = log::audit(
                conn,
                "add",
                "lot",
                &format!("{} x{} fin {}", product.reference, quantite, date::fmt_date(fin)),
            );
            success(format!(
                "Lot #{} créé: {} x{} (péremption {})",
                id,
                product.reference,
                quantite,
                date::fmt_date(fin)
            ));
        }

        LotCmd::Del { id } => {
            let lot = queries::find_lot_by_id(conn, *id)?
                .ok_or_else(|| AppError::Other(format!("lot introuvable: #{id}")))?;

            // Only expired lots can be purged; live stock goes out via 'out'.
            if lot.date_fin >= date::today() {
                return Err(AppError::Other(
                    "seuls les lots expirés peuvent être supprimés".into(),
                ));
            }

            queries::delete_lot(conn, *id)?;

            let _ = log::audit(
                conn,
                "del",
                "lot",
                &format!("#{} {} fin {}", id, lot.reference, lot.fin_str()),
            );
            success(format!(
                "Lot expiré supprimé pour le produit {}",
                lot.reference
            ));
        }

        LotCmd::List {
            search,
            level,
            sort,
            panel,
        } => {
            if let Some(lv) = level
                && AlertLevel::from_code(lv).is_none()
                && !lv.trim().is_empty()
            {
                return Err(AppError::InvalidAlertLevel(lv.clone()));
            }

            let lots = queries::load_lots(conn)?;
            if lots.is_empty() {
                info("No lot recorded yet.");
                return Ok(());
            }

            let today = date::today();

            // Quantity sits at index 4 (QTY_COL) so the "qty" sort key works.
            let rows = lots
                .iter()
                .map(|lot| {
                    let (lvl, status) =
                        lot_expiry_status(date::days_left(lot.date_fin, today), lot.nbr_days_alert);
                    Row::with_level(
                        vec![
                            lot.display_name().to_string(),
                            lot.reference.clone(),
                            lot.entree_str(),
                            lot.fin_str(),
                            lot.quantite.to_string(),
                            status,
                        ],
                        lvl,
                    )
                })
                .collect();

            let mut view = TableView::new(rows);
            if let Some(term) = search {
                view.search(term);
            }
            if let Some(lv) = level {
                view.filter_level(lv);
            }
            if let Some(key) = sort {
                view.sort(key);
            }

            if cfg.show_summary_panel || *panel {
                println!("{}", render_summary_panel(view.level_counts()));
            }

            if view.visible_count() == 0 {
                warning("No lot matches the given filters.");
                return Ok(());
            }

            let mut table = Table::with_headers(&[
                "Produit", "Référence", "Entrée", "Péremption", "Quantité", "Statut",
            ]);
            for row in view.visible_rows() {
                table.add_row(row.cells.clone());
            }
            print!("{}", render_with_levels(&table, &view));
        }
    }

    Ok(())
}
