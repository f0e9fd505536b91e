use serde::Serialize;

use super::track::GeoPoint;

/// One timestamped position fix as buffered by a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: i64, // epoch seconds
    pub latitude: f64,
    pub longitude: f64,
}

impl Sample {
    pub fn new(timestamp: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
