use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::time::Duration;

/// `record` writes from a background thread while another `openbrd` process
/// may be reading the same file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Prepare a connection for use: busy timeout, then schema creation and
/// upgrades through the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    run_pending_migrations(conn)?;
    Ok(())
}
