use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::{SqliteTrackStore, TrackStore};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::fs::confirmed;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    io::stdin().read_line(&mut s).is_ok() && confirmed(&s)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { ids, yes } = cmd {
        let ids: BTreeSet<i64> = ids.iter().copied().collect();
        let listed: Vec<String> = ids.iter().map(|i| format!("#{i}")).collect();

        let prompt = format!(
            "Delete track(s) {}? This action is irreversible.",
            listed.join(", ")
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let store = SqliteTrackStore::open(&cfg.database)?;
        let deleted = store.delete_many(&ids)?;

        // id inesistenti: ignorati, ma segnalati
        if deleted < ids.len() {
            warning(format!(
                "{} of {} requested track(s) did not exist.",
                ids.len() - deleted,
                ids.len()
            ));
        }

        if deleted > 0 {
            success(format!("{} track(s) deleted.", deleted));
        } else {
            info("No track deleted.");
        }
    }

    Ok(())
}
