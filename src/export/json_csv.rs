// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{PointExport, TrackExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(tracks: &[TrackExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(tracks)
        .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV, one row per point (header incluso grazie a serde).
pub(crate) fn export_csv(tracks: &[TrackExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let rows: Vec<PointExport> = tracks.iter().flat_map(TrackExport::rows).collect();

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in &rows {
        wtr.serialize(item)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
