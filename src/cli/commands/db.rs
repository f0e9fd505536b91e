use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracks::{TrackEntry, decode_all};
use crate::db::log::{AuditOp, ttlog_quiet};
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::load_all_tracks;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::step;
use crate::utils::colors::{GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        if !(*migrate || *check || *vacuum || *info) {
            println!("Nothing to do: use --migrate, --check, --vacuum or --info.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            step("Running migrations");
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check {
            step("Running integrity check");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            // payload illeggibili: il file è sano ma la traccia no
            let records = load_all_tracks(&pool.conn)?;
            let corrupted: Vec<String> = decode_all(&records)
                .iter()
                .filter_map(|e| match e {
                    TrackEntry::Corrupted { id, .. } => Some(format!("#{id}")),
                    TrackEntry::Ready(_) => None,
                })
                .collect();

            if corrupted.is_empty() {
                println!("{}✔ All {} track payload(s) decode.{}\n", GREEN, records.len(), RESET);
            } else {
                println!(
                    "{}✘ {} corrupted track(s):{} {}\n",
                    RED,
                    corrupted.len(),
                    RESET,
                    corrupted.join(", ")
                );
            }
        }

        if *vacuum {
            step("Running VACUUM");
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);

            ttlog_quiet(&pool.conn, AuditOp::Vacuum, "", "Database optimized");
        }
    }

    Ok(())
}
