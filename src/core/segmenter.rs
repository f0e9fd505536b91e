use crate::models::control_event::ControlEvent;
use crate::models::sample::Sample;
use crate::models::track::PathSegment;

/// Rebuild the recorded path segments from a sample stream and its events.
///
/// Both inputs must already be in chronological order; nothing is sorted here.
///
/// - the cursor starts on the first event, whatever its kind
/// - a Start moves the cursor and emits nothing
/// - a Pause/Stop emits the samples strictly between the cursor and itself,
///   if any, and leaves the cursor where it is
///
/// A Stop following a Pause therefore emits the run from the last Start
/// again, up to the Stop. A sample whose timestamp equals a boundary
/// timestamp is excluded.
pub fn build_segments(samples: &[Sample], events: &[ControlEvent]) -> Vec<PathSegment> {
    let Some(first) = events.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut segment_start: &ControlEvent = first;

    for ev in events {
        if ev.kind.is_start() {
            segment_start = ev;
            continue;
        }

        let points: Vec<_> = samples
            .iter()
            .filter(|s| s.timestamp > segment_start.timestamp && s.timestamp < ev.timestamp)
            .map(Sample::point)
            .collect();

        if !points.is_empty() {
            segments.push(PathSegment { points });
        }
    }

    segments
}
