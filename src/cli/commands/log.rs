use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::initialize::init_db;
use crate::db::log::AuditOp;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, op } = cmd {
        if !*print {
            println!("Nothing to do: use --print [--op OPERATION].");
            return Ok(());
        }

        let op = match op {
            Some(name) => Some(
                AuditOp::from_db_str(name)
                    .ok_or_else(|| AppError::Other(format!("unknown log operation '{name}'")))?,
            ),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;
        LogLogic::print_log(&mut pool, op)?;
    }

    Ok(())
}
