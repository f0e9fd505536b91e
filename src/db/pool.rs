//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::fs;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file, creating its parent directory when missing.
    pub fn new(path: &str) -> Result<Self> {
        let path = Path::new(path);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            // se fallisce, l'errore vero arriva da Connection::open
            let _ = fs::create_dir_all(parent);
        }

        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, gone when dropped.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
