use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracks::{TrackEntry, decode_all};
use crate::db::store::{SqliteTrackStore, TrackStore};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RED, RESET};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_epoch, format_span};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { segments } = cmd {
        let store = SqliteTrackStore::open(&cfg.database)?;
        let records = store.list_all()?;

        if records.is_empty() {
            info("No tracks recorded yet.");
            return Ok(());
        }

        let separator = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(
            vec![
                Column::new("ID", 4),
                Column::new("STARTED", 19),
                Column::new("DURATION", 11),
                Column::new("SAMPLES", 7),
                Column::new("EVENTS", 6),
                Column::new("SEGMENTS", 8),
            ],
            separator,
        );

        let mut details: Vec<(i64, Vec<usize>)> = Vec::new();

        for entry in decode_all(&records) {
            match entry {
                TrackEntry::Ready(track) => {
                    let segs = track.segments();
                    let started = track
                        .started_at()
                        .map(format_epoch)
                        .unwrap_or_else(|| "--".into());
                    let duration = match (track.events.first(), track.events.last()) {
                        (Some(a), Some(b)) => format_span(b.timestamp - a.timestamp),
                        _ => "--".into(),
                    };

                    table.add_row(vec![
                        track.id.to_string(),
                        started,
                        duration,
                        track.samples.len().to_string(),
                        track.events.len().to_string(),
                        segs.len().to_string(),
                    ]);
                    details.push((track.id, segs.iter().map(|s| s.len()).collect()));
                }
                TrackEntry::Corrupted { id, .. } => {
                    table.add_row(vec![
                        id.to_string(),
                        "unavailable (corrupted)".into(),
                    ]);
                }
            }
        }

        print!("{}", table.render());
        println!("{GREY}{} track(s){RESET}", records.len());

        if *segments {
            println!();
            for (id, sizes) in details {
                if sizes.is_empty() {
                    println!("#{id}: {RED}no segments{RESET}");
                    continue;
                }
                let sizes: Vec<String> = sizes.iter().map(|n| n.to_string()).collect();
                println!("#{id}: {} point(s) per segment", sizes.join(" / "));
            }
        }
    }
    Ok(())
}
