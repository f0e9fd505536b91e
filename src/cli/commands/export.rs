use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use std::collections::BTreeSet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        ids,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        let ids: BTreeSet<i64> = ids.iter().copied().collect();
        ExportLogic::export(&mut pool, *format, file, &ids, *force)?;
    }
    Ok(())
}
