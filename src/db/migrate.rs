use crate::db::log::AuditOp;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `tracks` table with the current schema.
fn create_tracks_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            path        TEXT NOT NULL,
            events      TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_events ON tracks(events);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = ?1 AND target = ?2
         LIMIT 1",
    )?;
    Ok(chk
        .query_row([AuditOp::MigrationApplied.as_str(), version], |_| Ok(()))
        .optional()?
        .is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), ?1, ?2, ?3)",
        [AuditOp::MigrationApplied.as_str(), version, message],
    )?;
    Ok(())
}

/// Add `created_at` to track tables created before it existed.
fn migrate_add_created_at(conn: &Connection) -> Result<(), Error> {
    let version = "20250301_0002_add_track_created_at";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "tracks", "created_at")? {
        conn.execute(
            "ALTER TABLE tracks ADD COLUMN created_at TEXT NOT NULL DEFAULT '';",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'created_at' column: {}", e)),
            )
        })?;
        success("Added 'created_at' column to tracks table.");
    }

    mark_applied(conn, version, "Added created_at to tracks")?;
    Ok(())
}

/// Import rows of the legacy `paths` table (uid, path, events) into `tracks`.
///
/// The sample payload is copied verbatim. Event kinds were written upper case
/// (`START`, `PAUSE`, `STOP`) and are rewritten to the current tokens.
/// Import, drop and bookkeeping commit together or not at all.
fn migrate_legacy_paths(conn: &Connection) -> Result<(), Error> {
    let version = "20250301_0001_import_legacy_paths";

    if !table_exists(conn, "paths")? || migration_applied(conn, version)? {
        return Ok(());
    }

    warning("Legacy 'paths' table detected, creating safety backup before import...");

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        warning("Could not determine DB path, backup skipped.");
    } else {
        backup_before_migration(&db_path)?;
    }

    let tx = conn.unchecked_transaction()?;

    let imported = tx.execute(
        "INSERT INTO tracks (path, events, created_at)
         SELECT path,
                REPLACE(REPLACE(REPLACE(events,
                    ',START', ',Start'),
                    ',PAUSE', ',Pause'),
                    ',STOP', ',Stop'),
                ''
         FROM paths ORDER BY uid ASC",
        [],
    )?;

    tx.execute_batch("DROP TABLE paths;")?;
    mark_applied(
        &tx,
        version,
        &format!("Imported {} tracks from legacy paths table", imported),
    )?;

    tx.commit()?;

    success(format!("Imported {} legacy tracks.", imported));
    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let to_sql_err = |stage: &str, e: String| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({}): {}",
            stage, e
        ))))
    };

    let backup_name = format!(
        "{}-backup_db_pre_tracks.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .join(&backup_name);

    let file = File::create(&backup_path).map_err(|e| to_sql_err("create", e.to_string()))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_sql_err("start_file", e.to_string()))?;

    let db_content = fs::read(db_path).map_err(|e| to_sql_err("read", e.to_string()))?;

    zip.write_all(&db_content)
        .map_err(|e| to_sql_err("write_all", e.to_string()))?;

    zip.finish()
        .map_err(|e| to_sql_err("finish", e.to_string()))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db() e da `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Ensure tracks table
    if !table_exists(conn, "tracks")? {
        create_tracks_table(conn)?;
        success("Created tracks table.");
    } else {
        migrate_add_created_at(conn)?;
        conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_tracks_events ON tracks(events);")?;
    }

    // 3) Import data recorded by older releases
    migrate_legacy_paths(conn)?;

    Ok(())
}
