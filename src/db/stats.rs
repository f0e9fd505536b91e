use crate::db::pool::DbPool;
use crate::db::queries::count_tracks;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::DateTime;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL TRACKS
    //
    let count = count_tracks(&pool.conn)?;
    println!(
        "{}• Total tracks:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) RECORDING RANGE (first epoch of the first/last events string)
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT events FROM tracks ORDER BY events ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT events FROM tracks ORDER BY events DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt = |events: Option<String>| {
        events
            .as_deref()
            .and_then(leading_epoch)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Recorded:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}

fn leading_epoch(events: &str) -> Option<i64> {
    events.split_once(',').and_then(|(ts, _)| ts.parse().ok())
}
