use serde::Serialize;

/// A persisted track: two encoded strings plus bookkeeping.
///
/// `path` holds the encoded samples and `events` the encoded control events,
/// both in the `;`-joined text format of [`crate::core::codec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRecord {
    pub id: i64,
    pub path: String,
    pub events: String,
    pub created_at: String, // ISO8601, used only by listings
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One continuous recording interval, ready for drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathSegment {
    pub points: Vec<GeoPoint>,
}

impl PathSegment {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
