//! In-process fakes for the positioning and persistence boundaries.

use crate::core::positioning::{FixSink, PositionSource};
use crate::db::store::TrackStore;
use crate::errors::{AppError, AppResult};
use crate::models::sample::Sample;
use crate::models::track::TrackRecord;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Source whose fixes are pushed by the test.
#[derive(Default)]
pub struct FakeSource {
    sink: Mutex<Option<FixSink>>,
    subscribes: Mutex<usize>,
    unsubscribes: Mutex<usize>,
}

impl FakeSource {
    pub fn emit(&self, s: Sample) {
        let sink = lock(&self.sink).clone();
        if let Some(sink) = sink {
            sink(s);
        }
    }

    pub fn subscribes(&self) -> usize {
        *lock(&self.subscribes)
    }

    pub fn unsubscribes(&self) -> usize {
        *lock(&self.unsubscribes)
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.sink).is_some()
    }
}

impl PositionSource for FakeSource {
    fn subscribe(&self, sink: FixSink) {
        *lock(&self.subscribes) += 1;
        *lock(&self.sink) = Some(sink);
    }

    fn unsubscribe(&self) {
        *lock(&self.unsubscribes) += 1;
        *lock(&self.sink) = None;
    }
}

/// Store that only remembers what it was asked to insert.
#[derive(Default)]
pub struct FakeStore {
    inserted: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn inserted(&self) -> Vec<(String, String)> {
        lock(&self.inserted).clone()
    }
}

impl TrackStore for FakeStore {
    fn insert(&self, path: &str, events: &str) -> AppResult<TrackRecord> {
        if self.fail {
            return Err(AppError::Other("disk full".into()));
        }
        let mut v = lock(&self.inserted);
        v.push((path.to_string(), events.to_string()));
        Ok(TrackRecord {
            id: v.len() as i64,
            path: path.to_string(),
            events: events.to_string(),
            created_at: String::new(),
        })
    }

    fn list_all(&self) -> AppResult<Vec<TrackRecord>> {
        Ok(Vec::new())
    }

    fn load_by_ids(&self, _ids: &BTreeSet<i64>) -> AppResult<Vec<TrackRecord>> {
        Ok(Vec::new())
    }

    fn delete_many(&self, _ids: &BTreeSet<i64>) -> AppResult<usize> {
        Ok(0)
    }
}
