use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lookup::{ProductMap, Selection};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::colorize_optional;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Lookup { code, map } = cmd else {
        return Ok(());
    };

    let map = match map {
        Some(file) => {
            let json = fs::read_to_string(file)?;
            ProductMap::from_json(&json)?
        }
        None => {
            let pool = DbPool::new(&cfg.database)?;
            ProductMap::new(queries::load_product_map(&pool.conn)?)
        }
    };

    let mut selection = Selection::new();
    match selection.apply(&map, code) {
        Some(id) => {
            // resolve() just matched, so the entry is present.
            if let Some(entry) = map.entries().iter().find(|p| p.id == id) {
                let nom = if entry.nom.is_empty() { "-" } else { &entry.nom };
                println!("ID         : {}", entry.id);
                println!("Nom        : {}", colorize_optional(nom));
                println!("Référence  : {}", entry.reference);
                println!("Code-barres: {}", entry.barcode);
            }
        }
        None => warning(format!("Non trouvé: {}", code)),
    }

    Ok(())
}
