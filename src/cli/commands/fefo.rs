use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::fefo;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::utils::date;

/// Preview the FEFO pick for a typed or scanned code, without touching
/// stock. Output mirrors the three live fields of the movement screen,
/// which only ever sees lots in stock and not yet expired.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Fefo { code } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let lots = queries::load_current_lots(&pool.conn, date::today())?;

    let preview = fefo::preview(&lots, code);

    println!("Produit    : {}", preview.produit);
    println!("Entrée     : {}", preview.entree);
    println!("Péremption : {}", preview.peremption);

    Ok(())
}
