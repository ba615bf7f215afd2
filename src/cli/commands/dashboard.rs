use crate::config::Config;
use crate::core::alerts::{product_expiry_status, stock_status};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::alert_level::AlertLevel;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_level};
use crate::utils::date;
use crate::utils::table::Table;

/// Per-product status overview with the global alert counters on top.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let products = queries::load_products_with_lots(&pool.conn)?;

    if products.is_empty() {
        info("No product recorded yet.");
        return Ok(());
    }

    let today = date::today();

    let mut rupture = 0usize;
    let mut seuil = 0usize;
    let mut expired = 0usize;
    let mut near_expiry = 0usize;

    let mut table = Table::with_headers(&[
        "Produit", "Référence", "Famille", "Stock", "Statut stock", "Statut péremption",
    ]);
    let mut levels = Vec::new();

    for pw in &products {
        let p = &pw.product;
        let (stock_level, stock_label) = stock_status(pw.stock_total, p.nbr_qnt_alert);
        let next_expiry = pw.next_lot().map(|l| l.date_fin);
        let (exp_level, exp_label) =
            product_expiry_status(pw.stock_total, next_expiry, p.nbr_days_alert, today);

        match stock_level {
            AlertLevel::Danger => rupture += 1,
            AlertLevel::Near => seuil += 1,
            AlertLevel::Ok => {}
        }
        match exp_level {
            AlertLevel::Danger => expired += 1,
            AlertLevel::Near => near_expiry += 1,
            AlertLevel::Ok => {}
        }

        let level = if stock_level.is_danger() || exp_level.is_danger() {
            AlertLevel::Danger
        } else if stock_level == AlertLevel::Near || exp_level == AlertLevel::Near {
            AlertLevel::Near
        } else {
            AlertLevel::Ok
        };
        levels.push(level);

        table.add_row(vec![
            p.display_name().to_string(),
            p.reference.clone(),
            p.famille.clone(),
            pw.stock_total.to_string(),
            stock_label,
            exp_label,
        ]);
    }

    header("Tableau de bord");
    println!("Produits           : {}", products.len());
    println!("Ruptures de stock  : {rupture}");
    println!("Seuils atteints    : {seuil}");
    println!("Lots expirés       : {expired}");
    println!("Proches expiration : {near_expiry}");
    println!();

    let rendered = table.render();
    let mut lines = rendered.lines();
    if let Some(h) = lines.next() {
        println!("{h}");
    }
    if let Some(s) = lines.next() {
        println!("{s}");
    }
    for (line, level) in lines.zip(levels.iter()) {
        println!("{}{}{}", color_for_level(*level), line, RESET);
    }

    Ok(())
}
