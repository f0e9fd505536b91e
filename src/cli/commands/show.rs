use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracks::{TrackEntry, decode_all};
use crate::db::store::{SqliteTrackStore, TrackStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, warning};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::time::format_epoch;
use std::collections::BTreeSet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { ids } = cmd {
        let wanted: BTreeSet<i64> = ids.iter().copied().collect();

        let store = SqliteTrackStore::open(&cfg.database)?;
        let records = store.load_by_ids(&wanted)?;

        if records.is_empty() {
            let first = wanted.iter().next().copied().unwrap_or_default();
            return Err(AppError::TrackNotFound(first));
        }

        let found: BTreeSet<i64> = records.iter().map(|r| r.id).collect();
        for missing in wanted.difference(&found) {
            warning(format!("Track #{} not found.", missing));
        }

        for entry in decode_all(&records) {
            match entry {
                TrackEntry::Ready(track) => {
                    header(format!("Track #{}", track.id));

                    for ev in &track.events {
                        println!(
                            "  {GREY}{}{RESET}  {}",
                            format_epoch(ev.timestamp),
                            ev.kind
                        );
                    }

                    let segments = track.segments();
                    if segments.is_empty() {
                        println!("  {GREY}(no segments){RESET}");
                    }

                    for (i, seg) in segments.iter().enumerate() {
                        println!("  {CYAN}segment {}{RESET} ({} points)", i + 1, seg.len());
                        for p in &seg.points {
                            println!("    {}, {}", p.latitude, p.longitude);
                        }
                    }
                    println!();
                }
                TrackEntry::Corrupted { id, error: e } => {
                    error(format!("Track #{} is unavailable (corrupted): {}", id, e));
                }
            }
        }
    }
    Ok(())
}
