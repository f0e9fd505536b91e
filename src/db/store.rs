//! Persistence boundary for finished tracks.

use crate::db::initialize::init_db;
use crate::db::log::{AuditOp, ttlog_quiet};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::track::TrackRecord;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/// Where encoded tracks live. Shared with background finalize jobs, hence
/// `Send + Sync` and `&self` everywhere.
pub trait TrackStore: Send + Sync {
    fn insert(&self, path: &str, events: &str) -> AppResult<TrackRecord>;
    fn list_all(&self) -> AppResult<Vec<TrackRecord>>;
    fn load_by_ids(&self, ids: &BTreeSet<i64>) -> AppResult<Vec<TrackRecord>>;
    fn delete_many(&self, ids: &BTreeSet<i64>) -> AppResult<usize>;
}

pub struct SqliteTrackStore {
    pool: Mutex<DbPool>,
}

impl SqliteTrackStore {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            pool: Mutex::new(pool),
        })
    }

    fn pool(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.pool
            .lock()
            .map_err(|_| AppError::Other("track store lock poisoned".into()))
    }
}

impl TrackStore for SqliteTrackStore {
    fn insert(&self, path: &str, events: &str) -> AppResult<TrackRecord> {
        let pool = self.pool()?;
        let rec = queries::insert_track(&pool.conn, path, events)?;

        ttlog_quiet(
            &pool.conn,
            AuditOp::Record,
            &format!("track #{}", rec.id),
            "Track recorded",
        );

        Ok(rec)
    }

    fn list_all(&self) -> AppResult<Vec<TrackRecord>> {
        queries::load_all_tracks(&self.pool()?.conn)
    }

    fn load_by_ids(&self, ids: &BTreeSet<i64>) -> AppResult<Vec<TrackRecord>> {
        queries::load_tracks_by_ids(&self.pool()?.conn, ids)
    }

    fn delete_many(&self, ids: &BTreeSet<i64>) -> AppResult<usize> {
        let pool = self.pool()?;
        let n = queries::delete_tracks(&pool.conn, ids)?;

        if n > 0 {
            let target: Vec<String> = ids.iter().map(|i| format!("#{i}")).collect();
            ttlog_quiet(
                &pool.conn,
                AuditOp::Del,
                &target.join(","),
                &format!("Deleted {} track(s)", n),
            );
        }

        Ok(n)
    }
}
