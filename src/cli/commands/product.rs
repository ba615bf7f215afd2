use crate::cli::parser::{Commands, ProductCmd};
use crate::config::Config;
use crate::core::alerts::{product_expiry_status, stock_status};
use crate::core::view::{Row, TableView};
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::alert_level::AlertLevel;
use crate::models::family::FALLBACK_FAMILY;
use crate::models::product::Product;
use crate::ui::messages::{info, success, warning};
use crate::ui::render::render_with_levels;
use crate::utils::date;
use crate::utils::table::Table;
use regex::Regex;

/// Column index of the family name in the product listing.
const FAMILY_COL: usize = 3;

/// Barcodes are plain digit strings, EAN-8 up to EAN/GTIN-14.
fn validate_barcode(barcode: &str) -> AppResult<()> {
    let re = Regex::new(r"^[0-9]{8,14}$").map_err(|e| AppError::Other(e.to_string()))?;
    if re.is_match(barcode.trim()) {
        Ok(())
    } else {
        Err(AppError::InvalidBarcode(barcode.to_string()))
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Product { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        ProductCmd::Add {
            reference,
            barcode,
            nom,
            famille,
            days_alert,
            qnt_alert,
        } => {
            let reference = reference.trim();
            if reference.is_empty() {
                return Err(AppError::Other("reference must not be empty".into()));
            }
            validate_barcode(barcode)?;

            let famille_name = famille
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .unwrap_or(cfg.fallback_family.as_str());

            let fam = match queries::find_family_by_name(conn, famille_name)? {
                Some(f) => f,
                None if famille_name == FALLBACK_FAMILY => {
                    let id = queries::insert_family(conn, FALLBACK_FAMILY)?;
                    crate::models::family::Family {
                        id,
                        nom: FALLBACK_FAMILY.to_string(),
                    }
                }
                None => return Err(AppError::FamilyNotFound(famille_name.to_string())),
            };

            let product = Product::new(
                0,
                reference.to_string(),
                nom.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(String::from),
                barcode.trim().to_string(),
                fam.id,
                fam.nom.clone(),
                (*days_alert).unwrap_or(cfg.default_days_alert),
                (*qnt_alert).unwrap_or(cfg.default_qnt_alert),
            );
            queries::insert_product(conn, &product)?;

            let _ = log::audit(conn, "add", "produit", reference);
            success(format!(
                "Produit créé: {} (code-barres {}, famille {})",
                reference,
                product.barcode,
                fam.nom
            ));
        }

        ProductCmd::Edit {
            code,
            nom,
            barcode,
            famille,
            days_alert,
            qnt_alert,
        } => {
            let mut product = queries::find_product_by_code(conn, code)?
                .ok_or_else(|| AppError::ProductNotFound(code.clone()))?;

            if let Some(n) = nom {
                product.nom = Some(n.trim().to_string()).filter(|n| !n.is_empty());
            }
            if let Some(bc) = barcode {
                validate_barcode(bc)?;
                product.barcode = bc.trim().to_string();
            }
            if let Some(f) = famille {
                let fam = queries::find_family_by_name(conn, f)?
                    .ok_or_else(|| AppError::FamilyNotFound(f.clone()))?;
                product.famille_id = fam.id;
                product.famille = fam.nom;
            }
            if let Some(d) = days_alert {
                product.nbr_days_alert = *d;
            }
            if let Some(q) = qnt_alert {
                product.nbr_qnt_alert = *q;
            }

            queries::update_product(conn, &product)?;

            let _ = log::audit(conn, "edit", "produit", &product.reference);
            success(format!("Produit modifié avec succès: {}", product.reference));
        }

        ProductCmd::List {
            famille,
            search,
            sort,
        } => {
            let products = queries::load_products_with_lots(conn)?;
            if products.is_empty() {
                info("No product recorded yet.");
                return Ok(());
            }

            let today = date::today();

            // Columns mirror the lot listing: quantity sits at index 4 so
            // the shared "qty" sort key applies to both views.
            let mut rows = Vec::new();
            for pw in &products {
                let p = &pw.product;
                let (stock_level, _) = stock_status(pw.stock_total, p.nbr_qnt_alert);
                let next_expiry = pw.next_lot().map(|l| l.date_fin);
                let (exp_level, exp_label) =
                    product_expiry_status(pw.stock_total, next_expiry, p.nbr_days_alert, today);

                let level = if stock_level.is_danger() || exp_level.is_danger() {
                    AlertLevel::Danger
                } else if stock_level == AlertLevel::Near || exp_level == AlertLevel::Near {
                    AlertLevel::Near
                } else {
                    AlertLevel::Ok
                };

                rows.push(Row::with_level(
                    vec![
                        p.display_name().to_string(),
                        p.reference.clone(),
                        p.barcode.clone(),
                        p.famille.clone(),
                        pw.stock_total.to_string(),
                        exp_label,
                    ],
                    level,
                ));
            }

            let mut view = TableView::new(rows);
            if let Some(term) = search {
                view.search(term);
            }
            if let Some(f) = famille {
                view.filter_column(FAMILY_COL, f);
            }
            if let Some(key) = sort {
                view.sort(key);
            }

            if view.visible_count() == 0 {
                warning("No product matches the given filters.");
                return Ok(());
            }

            let mut table = Table::with_headers(&[
                "Nom", "Référence", "Code-barres", "Famille", "Stock", "Péremption",
            ]);
            for row in view.visible_rows() {
                table.add_row(row.cells.clone());
            }
            print!("{}", render_with_levels(&table, &view));
        }

        ProductCmd::Del { code } => {
            let product = queries::find_product_by_code(conn, code)?
                .ok_or_else(|| AppError::ProductNotFound(code.clone()))?;

            let lots = queries::product_lot_count(conn, product.id)?;
            queries::delete_product(conn, product.id)?;

            let _ = log::audit(conn, "del", "produit", &product.reference);
            success(format!(
                "Produit supprimé: {} ({} lot(s) supprimé(s))",
                product.reference, lots
            ));
        }
    }

    Ok(())
}
