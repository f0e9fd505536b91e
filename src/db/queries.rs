use crate::errors::AppResult;
use crate::models::track::TrackRecord;
use chrono::Local;
use rusqlite::{Connection, Result, Row, params, params_from_iter};
use std::collections::BTreeSet;

pub fn map_row(row: &Row) -> Result<TrackRecord> {
    Ok(TrackRecord {
        id: row.get("id")?,
        path: row.get("path")?,
        events: row.get("events")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_track(conn: &Connection, path: &str, events: &str) -> AppResult<TrackRecord> {
    let created_at = Local::now().to_rfc3339();

    conn.execute(
        "INSERT INTO tracks (path, events, created_at) VALUES (?1, ?2, ?3)",
        params![path, events, created_at],
    )?;

    Ok(TrackRecord {
        id: conn.last_insert_rowid(),
        path: path.to_string(),
        events: events.to_string(),
        created_at,
    })
}

/// All tracks, oldest recording first.
///
/// The encoded events start with the recording's first timestamp, so ordering
/// by that text is chronological for same-width epochs; id breaks ties.
pub fn load_all_tracks(conn: &Connection) -> AppResult<Vec<TrackRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, path, events, created_at FROM tracks
         ORDER BY events ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

pub fn load_tracks_by_ids(conn: &Connection, ids: &BTreeSet<i64>) -> AppResult<Vec<TrackRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id, path, events, created_at FROM tracks
         WHERE id IN ({}) ORDER BY id ASC",
        placeholders(ids.len())
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete the given tracks; returns how many rows went away.
pub fn delete_tracks(conn: &Connection, ids: &BTreeSet<i64>) -> AppResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let sql = format!("DELETE FROM tracks WHERE id IN ({})", placeholders(ids.len()));
    let n = conn.execute(&sql, params_from_iter(ids.iter()))?;
    Ok(n)
}

pub fn count_tracks(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))
}
