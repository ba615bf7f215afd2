use crate::cli::parser::{Commands, FamilyCmd};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::family::FALLBACK_FAMILY;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Family { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        FamilyCmd::Add { nom } => {
            if queries::find_family_by_name(conn, nom)?.is_some() {
                return Err(AppError::Other(format!("family already exists: {nom}")));
            }
            queries::insert_family(conn, nom)?;

            let _ = log::audit(conn, "add", "famille", nom.trim());
            success(format!("Famille créée: {}", nom.trim()));
        }

        FamilyCmd::List => {
            let families = queries::list_families(conn)?;
            if families.is_empty() {
                info("No family recorded yet.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "Nom", "Produits"]);
            for fam in &families {
                let count = queries::family_product_count(conn, fam.id)?;
                table.add_row(vec![fam.id.to_string(), fam.nom.clone(), count.to_string()]);
            }
            println!("{}", table.render());
        }

        FamilyCmd::Del { nom, with_products } => {
            let fam = queries::find_family_by_name(conn, nom)?
                .ok_or_else(|| AppError::FamilyNotFound(nom.clone()))?;

            if fam.is_fallback() {
                return Err(AppError::Other(
                    "the fallback family '-' cannot be deleted".into(),
                ));
            }

            if *with_products {
                let deleted = queries::delete_family_with_products(conn, fam.id)?;
                let _ = log::audit(conn, "del", "famille", &fam.nom);
                success(format!(
                    "Famille supprimée: {} ({} produit(s) supprimé(s))",
                    fam.nom, deleted
                ));
            } else {
                let fallback = match queries::find_family_by_name(conn, FALLBACK_FAMILY)? {
                    Some(f) => f.id,
                    None => queries::insert_family(conn, FALLBACK_FAMILY)?,
                };
                let moved = queries::delete_family_move_products(conn, fam.id, fallback)?;
                let _ = log::audit(conn, "del", "famille", &fam.nom);
                success(format!(
                    "Famille supprimée: {} ({} produit(s) déplacé(s) vers '{}')",
                    fam.nom, moved, FALLBACK_FAMILY
                ));
            }
        }

        FamilyCmd::Rename { nom, new_name } => {
            let fam = queries::find_family_by_name(conn, nom)?
                .ok_or_else(|| AppError::FamilyNotFound(nom.clone()))?;

            if fam.is_fallback() {
                return Err(AppError::Other(
                    "the fallback family '-' cannot be renamed".into(),
                ));
            }
            if queries::find_family_by_name(conn, new_name)?.is_some() {
                return Err(AppError::Other(format!(
                    "family already exists: {new_name}"
                )));
            }

            queries::rename_family(conn, fam.id, new_name)?;
            let _ = log::audit(
                conn,
                "rename",
                "famille",
                &format!("{} -> {}", fam.nom, new_name.trim()),
            );
            success(format!("Famille renommée: {} -> {}", fam.nom, new_name.trim()));
        }
    }

    Ok(())
}
