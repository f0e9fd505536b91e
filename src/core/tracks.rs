//! Read side: decode stored tracks and rebuild their segments.

use crate::core::codec::{self, FormatError};
use crate::core::segmenter::build_segments;
use crate::models::control_event::ControlEvent;
use crate::models::sample::Sample;
use crate::models::track::{PathSegment, TrackRecord};

/// A stored track decoded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTrack {
    pub id: i64,
    pub created_at: String,
    pub samples: Vec<Sample>,
    pub events: Vec<ControlEvent>,
}

impl DecodedTrack {
    pub fn decode(rec: &TrackRecord) -> Result<Self, FormatError> {
        Ok(Self {
            id: rec.id,
            created_at: rec.created_at.clone(),
            samples: codec::decode_samples(&rec.path)?,
            events: codec::decode_events(&rec.events)?,
        })
    }

    pub fn segments(&self) -> Vec<PathSegment> {
        build_segments(&self.samples, &self.events)
    }

    /// Epoch of the first recorded event.
    pub fn started_at(&self) -> Option<i64> {
        self.events.first().map(|e| e.timestamp)
    }
}

/// Listing entry: either a usable track or the reason it is not.
#[derive(Debug)]
pub enum TrackEntry {
    Ready(DecodedTrack),
    Corrupted { id: i64, error: FormatError },
}

impl TrackEntry {
    pub fn id(&self) -> i64 {
        match self {
            TrackEntry::Ready(t) => t.id,
            TrackEntry::Corrupted { id, .. } => *id,
        }
    }
}

/// Decode every record independently; one bad record never hides the others.
pub fn decode_all(records: &[TrackRecord]) -> Vec<TrackEntry> {
    records
        .iter()
        .map(|rec| match DecodedTrack::decode(rec) {
            Ok(t) => TrackEntry::Ready(t),
            Err(error) => {
                log::warn!("track #{} is corrupted: {}", rec.id, error);
                TrackEntry::Corrupted { id: rec.id, error }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, path: &str, events: &str) -> TrackRecord {
        TrackRecord {
            id,
            path: path.into(),
            events: events.into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn corrupted_record_does_not_hide_others() {
        let records = vec![
            rec(1, "12,1,1;18,2,2", "10,Start;20,Stop"),
            rec(2, "12,oops,1", "10,Start;20,Stop"),
            rec(3, "31,3,3", "30,Start;40,Stop"),
        ];

        let entries = decode_all(&records);
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[0], TrackEntry::Ready(_)));
        assert!(matches!(
            entries[1],
            TrackEntry::Corrupted {
                id: 2,
                error: FormatError::InvalidCoordinate(_)
            }
        ));
        assert_eq!(entries[2].id(), 3);
    }

    #[test]
    fn decoded_track_segments() {
        let t = DecodedTrack::decode(&rec(
            7,
            "5,0,0;12,1,1;18,2,2;22,9,9;30,3,3;45,9,9",
            "10,Start;20,Pause;25,Start;40,Stop",
        ))
        .unwrap();

        let segs = t.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].len(), 2);
        assert_eq!(segs[1].len(), 1);
        assert_eq!(t.started_at(), Some(10));
    }
}
