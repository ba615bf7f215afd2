use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::movement::plan_withdrawal;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Out { code, qty, history } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *history {
        let movements = queries::load_movements(&pool.conn, 50)?;
        if movements.is_empty() {
            info("No stock-out movement recorded yet.");
            return Ok(());
        }

        let mut table = Table::with_headers(&["ID", "Référence", "Quantité", "Date"]);
        for m in &movements {
            table.add_row(vec![
                m.id.to_string(),
                m.reference.clone(),
                m.quantite.to_string(),
                date::fmt_date(m.date_sortie),
            ]);
        }
        println!("{}", table.render());
        return Ok(());
    }

    let Some(code) = code else {
        return Err(AppError::Other(
            "a product reference or barcode is required (or use --history)".into(),
        ));
    };

    if *qty == 0 {
        return Err(AppError::Other("quantity must be at least 1".into()));
    }

    let product = queries::find_product_by_code(&pool.conn, code)?
        .ok_or_else(|| AppError::ProductNotFound(code.clone()))?;

    let today = date::today();
    let lots = queries::eligible_lots(&pool.conn, product.id, today)?;
    let plan = plan_withdrawal(&lots, *qty)?;

    // One transaction: every deduction plus the movement row, or nothing.
    let tx = pool.conn.transaction()?;
    for step in &plan {
        queries::update_lot_quantity(&tx, step.lot_id, step.remaining)?;
    }
    queries::insert_movement(&tx, product.id, *qty, today)?;
    tx.commit()?;

    let _ = log::audit(
        &pool.conn,
        "out",
        "sortie",
        &format!("{} x{}", product.reference, qty),
    );

    success(format!("Sortie de stock: {} x{}", product.reference, qty));
    for step in &plan {
        println!(
            "  lot #{} : -{} (reste {})",
            step.lot_id, step.taken, step.remaining
        );
    }

    Ok(())
}
