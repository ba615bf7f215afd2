use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    ExportLogic::export(&mut pool, format.clone(), file, *force)?;

    let _ = log::audit(
        &pool.conn,
        "export",
        format.as_str(),
        &format!("Exported lots to {}", file),
    );

    Ok(())
}
