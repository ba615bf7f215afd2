use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::alerts::{AlertKind, AlertRow, build_alerts, sort_alerts};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::colors::{RESET, color_for_level};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Alerts {
        query,
        famille,
        kind,
        sort,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let products = queries::load_products_with_lots(&pool.conn)?;

    let kind = AlertKind::from_code(kind);
    let today = date::today();

    let (mut critical, mut warnings) = build_alerts(
        &products,
        kind,
        query.as_deref().unwrap_or(""),
        famille.as_deref().unwrap_or(""),
        today,
    );

    if let Some(key) = sort {
        sort_alerts(&mut critical, key);
        sort_alerts(&mut warnings, key);
    }

    if critical.is_empty() && warnings.is_empty() {
        success("Aucune alerte. Tout est en ordre.");
        return Ok(());
    }

    if !critical.is_empty() {
        header(format!("Alertes critiques ({})", critical.len()));
        print_alert_table(&critical);
    }

    if !warnings.is_empty() {
        header(format!("Avertissements ({})", warnings.len()));
        print_alert_table(&warnings);
    }

    Ok(())
}

fn print_alert_table(rows: &[AlertRow]) {
    let mut table = Table::with_headers(&[
        "Type", "Produit", "Référence", "Famille", "Stock", "Péremption", "Jours", "Statut",
    ]);

    for row in rows {
        table.add_row(vec![
            row.type_label.to_string(),
            row.produit_nom.clone(),
            row.reference.clone(),
            row.famille.clone(),
            row.stock_total.to_string(),
            row.date_fin.map(date::fmt_date).unwrap_or_else(|| "-".to_string()),
            row.days_left
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.status_label.clone(),
        ]);
    }

    let rendered = table.render();
    let mut lines = rendered.lines();

    if let Some(h) = lines.next() {
        println!("{h}");
    }
    if let Some(s) = lines.next() {
        println!("{s}");
    }
    for (line, row) in lines.zip(rows.iter()) {
        println!("{}{}{}", color_for_level(row.level), line, RESET);
    }
    println!();
}
