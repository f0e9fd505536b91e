//! Positioning boundary: who delivers fixes to a recording session.

use crate::core::clock::Clock;
use crate::errors::{AppError, AppResult};
use crate::models::sample::Sample;
use crate::models::track::GeoPoint;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Callback receiving each fix, possibly from another thread.
pub type FixSink = Arc<dyn Fn(Sample) + Send + Sync>;

/// A provider of live fixes.
///
/// Both calls are idempotent. When `unsubscribe` returns, the sink will not be
/// called again.
pub trait PositionSource: Send + Sync {
    fn subscribe(&self, sink: FixSink);
    fn unsubscribe(&self);
}

struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Replays a list of coordinates in a loop, one fix per interval, stamping
/// each with the current clock time.
pub struct ReplaySource {
    points: Arc<Vec<GeoPoint>>,
    interval: Duration,
    clock: Arc<dyn Clock>,
    worker: Mutex<Option<Worker>>,
}

impl ReplaySource {
    pub fn new(points: Vec<GeoPoint>, interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            points: Arc::new(points),
            interval,
            clock,
            worker: Mutex::new(None),
        }
    }

    /// Load coordinates from a CSV file: `latitude,longitude[,anything]`.
    /// A header line is tolerated; malformed rows are skipped with a warning.
    pub fn from_csv(path: &Path, interval: Duration, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let points = read_points(path)?;
        if points.is_empty() {
            return Err(AppError::Positioning(format!(
                "no usable coordinates in {}",
                path.display()
            )));
        }

        log::info!("loaded {} replay points from {}", points.len(), path.display());
        Ok(Self::new(points, interval, clock))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.worker.lock().map(|w| w.is_some()).unwrap_or(false)
    }
}

fn read_points(path: &Path) -> AppResult<Vec<GeoPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Positioning(format!("cannot open {}: {e}", path.display())))?;

    let mut points = Vec::new();

    for (line, rec) in rdr.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                log::warn!("replay line {}: {e}", line + 1);
                continue;
            }
        };

        let lat = rec.get(0).and_then(|s| s.parse::<f64>().ok());
        let lon = rec.get(1).and_then(|s| s.parse::<f64>().ok());

        match (lat, lon) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                points.push(GeoPoint {
                    latitude,
                    longitude,
                })
            }
            _ if line == 0 => log::debug!("replay: skipping header {:?}", rec),
            _ => log::warn!("replay line {}: not a coordinate pair", line + 1),
        }
    }

    Ok(points)
}

impl PositionSource for ReplaySource {
    fn subscribe(&self, sink: FixSink) {
        let Ok(mut slot) = self.worker.lock() else {
            log::error!("replay source lock poisoned");
            return;
        };
        if slot.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let points = Arc::clone(&self.points);
        let clock = Arc::clone(&self.clock);
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("replay-positioning".into())
            .spawn(move || {
                let mut idx = 0usize;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // stop richiesto oppure sender droppato
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    if points.is_empty() {
                        continue;
                    }
                    let p = points[idx % points.len()];
                    idx += 1;
                    sink(Sample::new(clock.now(), p.latitude, p.longitude));
                }
            });

        match spawned {
            Ok(handle) => *slot = Some(Worker { stop_tx, handle }),
            Err(e) => log::error!("failed to start replay thread: {e}"),
        }
    }

    fn unsubscribe(&self) {
        let worker = match self.worker.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };

        if let Some(w) = worker {
            let _ = w.stop_tx.send(());
            if w.handle.join().is_err() {
                log::error!("replay thread panicked");
            }
        }
    }
}

impl Drop for ReplaySource {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::env;
    use std::fs;
    use std::sync::Mutex;

    fn tmp_file(name: &str, content: &str) -> std::path::PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("{}_openbrd_replay.csv", name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn csv_loader_skips_header_and_bad_rows() {
        let path = tmp_file(
            "loader",
            "latitude,longitude\n45.1,9.2\nnot,numbers\n45.2,9.3,extra\n\n",
        );
        let src = ReplaySource::from_csv(
            &path,
            Duration::from_millis(5),
            Arc::new(ManualClock::new(0)),
        )
        .unwrap();

        assert_eq!(src.len(), 2);
        fs::remove_file(path).ok();
    }

    #[test]
    fn csv_without_points_is_an_error() {
        let path = tmp_file("empty", "latitude,longitude\n");
        let res = ReplaySource::from_csv(&path, Duration::from_millis(5), Arc::new(ManualClock::new(0)));

        assert!(matches!(res, Err(AppError::Positioning(_))));
        fs::remove_file(path).ok();
    }

    #[test]
    fn no_fix_after_unsubscribe() {
        let clock = Arc::new(ManualClock::new(100));
        let src = ReplaySource::new(
            vec![GeoPoint {
                latitude: 1.0,
                longitude: 2.0,
            }],
            Duration::from_millis(2),
            clock,
        );

        let got: Arc<Mutex<Vec<Sample>>> = Arc::new(Mutex::new(Vec::new()));
        let g = Arc::clone(&got);
        src.subscribe(Arc::new(move |s| g.lock().unwrap().push(s)));
        assert!(src.is_active());

        thread::sleep(Duration::from_millis(40));
        src.unsubscribe();
        src.unsubscribe();
        assert!(!src.is_active());

        let n = got.lock().unwrap().len();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(got.lock().unwrap().len(), n);
        assert!(got.lock().unwrap().iter().all(|s| s.timestamp == 100));
    }
}
