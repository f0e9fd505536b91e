// src/export/model.rs

use crate::core::tracks::DecodedTrack;
use crate::models::track::GeoPoint;
use chrono::DateTime;
use serde::Serialize;

/// One track with its segments, for JSON.
#[derive(Serialize, Clone, Debug)]
pub struct TrackExport {
    pub id: i64,
    pub created_at: String,
    pub started_at: Option<String>,
    pub segments: Vec<Vec<GeoPoint>>,
}

/// One point per row, for CSV.
#[derive(Serialize, Clone, Debug)]
pub struct PointExport {
    pub track_id: i64,
    pub segment: usize,
    pub seq: usize,
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackExport {
    pub fn from_track(t: &DecodedTrack) -> Self {
        Self {
            id: t.id,
            created_at: t.created_at.clone(),
            started_at: t
                .started_at()
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.to_rfc3339()),
            segments: t.segments().into_iter().map(|s| s.points).collect(),
        }
    }

    /// Flatten into CSV rows; segment and seq are 1-based.
    pub fn rows(&self) -> Vec<PointExport> {
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(si, seg)| {
                seg.iter().enumerate().map(move |(pi, p)| PointExport {
                    track_id: self.id,
                    segment: si + 1,
                    seq: pi + 1,
                    latitude: p.latitude,
                    longitude: p.longitude,
                })
            })
            .collect()
    }
}
