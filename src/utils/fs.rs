//! File-system helpers shared by export and backup.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Verifica se un file può essere creato o sovrascritto.
///
/// - file missing → Ok
/// - file present and `force` → Ok
/// - file present otherwise → ask on stdin; refusing cancels `what`
pub fn ensure_writable(path: &Path, force: bool, what: &str) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    if confirmed(&answer) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::from(io::Error::other(format!(
            "{what} cancelled: existing file not overwritten"
        ))))
    }
}

pub fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
