// src/export/logic.rs

use crate::core::tracks::{TrackEntry, decode_all};
use crate::db::log::{AuditOp, ttlog_quiet};
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_tracks, load_tracks_by_ids};
use crate::errors::AppResult;
use crate::utils::fs::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, TrackExport};
use crate::ui::messages::warning;
use std::collections::BTreeSet;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the segments of the selected tracks (all when `ids` is empty).
    /// Corrupted tracks are skipped with a warning.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        ids: &BTreeSet<i64>,
        force: bool,
    ) -> AppResult<usize> {
        let target = format.target_path(file);
        let path = target.as_path();

        ensure_writable(path, force, "Export")?;

        let records = if ids.is_empty() {
            load_all_tracks(&pool.conn)?
        } else {
            load_tracks_by_ids(&pool.conn, ids)?
        };

        let mut tracks = Vec::new();
        for entry in decode_all(&records) {
            match entry {
                TrackEntry::Ready(t) => tracks.push(TrackExport::from_track(&t)),
                TrackEntry::Corrupted { id, error } => {
                    warning(format!("Skipping track #{id}: unavailable (corrupted: {error})"));
                }
            }
        }

        if tracks.is_empty() {
            warning("No tracks to export.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&tracks, path)?,
            ExportFormat::Json => export_json(&tracks, path)?,
        }

        ttlog_quiet(
            &pool.conn,
            AuditOp::Export,
            &path.to_string_lossy(),
            &format!("Exported {} track(s) as {}", tracks.len(), format.as_str()),
        );

        Ok(tracks.len())
    }
}
