use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::{AuditOp, ttlog_quiet};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite track database and its migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    // Config::init_all crea ~/.openbrd/openbrd.conf e ritorna il path del DB
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing openbrd…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", &db_path);

    ttlog_quiet(
        &conn,
        AuditOp::Init,
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 openbrd initialization completed!");
    Ok(())
}
