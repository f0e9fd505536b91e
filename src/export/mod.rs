// src/export/mod.rs

mod json_csv;
pub mod logic;
mod model;

pub use logic::ExportLogic;
pub use model::{PointExport, TrackExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Output formats for `openbrd export`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per point: track_id, segment, seq, latitude, longitude
    Csv,
    /// One object per track with its segments as point arrays
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// `file` as given, or with this format's extension when it has none.
    pub fn target_path(&self, file: &str) -> PathBuf {
        let path = PathBuf::from(file);
        if path.extension().is_none() {
            path.with_extension(self.as_str())
        } else {
            path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_added_only_when_missing() {
        assert_eq!(
            ExportFormat::Json.target_path("/tmp/tracks"),
            PathBuf::from("/tmp/tracks.json")
        );
        assert_eq!(
            ExportFormat::Csv.target_path("/tmp/tracks.txt"),
            PathBuf::from("/tmp/tracks.txt")
        );
    }
}
