//! The recording state machine.
//!
//! A session owns the live sample/event buffers. Transitions (`start`,
//! `pause`, `stop`) are serialized among themselves; the positioning sink and
//! the transitions share one buffer mutex, so every append goes through a
//! single path.
//!
//! States: `Stopped` (initial) → `Running` ⇄ `Paused` → `Stopped`.

use crate::core::clock::Clock;
use crate::core::codec;
use crate::core::executor::Executor;
use crate::core::positioning::{FixSink, PositionSource};
use crate::db::store::TrackStore;
use crate::models::control_event::{ControlEvent, EventKind};
use crate::models::sample::Sample;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Stopped,
    Running,
    Paused,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Stopped => "stopped",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
        }
    }
}

/// What a transition call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied(EventKind),
    Ignored,
}

/// Point-in-time view for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub samples: usize,
    pub events: usize,
}

#[derive(Debug)]
struct Buffers {
    state: SessionState,
    samples: Vec<Sample>,
    events: Vec<ControlEvent>,
}

impl Buffers {
    /// Append an event, never earlier than the previous one: a wall clock
    /// stepped backwards must not reorder the session.
    fn push_event(&mut self, now: i64, kind: EventKind) {
        let ts = match self.events.last() {
            Some(prev) if now < prev.timestamp => {
                log::warn!("clock went back {}s, event clamped", prev.timestamp - now);
                prev.timestamp
            }
            _ => now,
        };
        self.events.push(ControlEvent::new(ts, kind));
    }
}

impl Default for Buffers {
    fn default() -> Self {
        Self {
            state: SessionState::Stopped,
            samples: Vec::new(),
            events: Vec::new(),
        }
    }
}

pub struct RecordingSession {
    buffers: Arc<Mutex<Buffers>>,
    // serializza start/pause/stop; il sink non lo prende mai
    transition: Mutex<()>,
    source: Arc<dyn PositionSource>,
    store: Arc<dyn TrackStore>,
    executor: Arc<dyn Executor>,
    clock: Arc<dyn Clock>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingSession {
    pub fn new(
        source: Arc<dyn PositionSource>,
        store: Arc<dyn TrackStore>,
        executor: Arc<dyn Executor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            buffers: Arc::new(Mutex::new(Buffers::default())),
            transition: Mutex::new(()),
            source,
            store,
            executor,
            clock,
        }
    }

    pub fn state(&self) -> SessionState {
        lock(&self.buffers).state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let b = lock(&self.buffers);
        SessionSnapshot {
            state: b.state,
            samples: b.samples.len(),
            events: b.events.len(),
        }
    }

    /// Begin (or resume) recording. No-op while already running.
    pub fn start(&self) -> Transition {
        let _guard = lock(&self.transition);

        {
            let mut b = lock(&self.buffers);
            if b.state == SessionState::Running {
                return Transition::Ignored;
            }
            b.push_event(self.clock.now(), EventKind::Start);
            b.state = SessionState::Running;
            log::debug!("session start: samples={}", b.samples.len());
        }

        // fuori dal lock: il source può chiamare il sink subito
        self.source.subscribe(self.sink());
        Transition::Applied(EventKind::Start)
    }

    /// Suspend recording. No-op unless running.
    pub fn pause(&self) -> Transition {
        let _guard = lock(&self.transition);

        if self.state() != SessionState::Running {
            return Transition::Ignored;
        }

        self.source.unsubscribe();

        let mut b = lock(&self.buffers);
        b.push_event(self.clock.now(), EventKind::Pause);
        b.state = SessionState::Paused;
        log::debug!("session pause: samples={}", b.samples.len());

        Transition::Applied(EventKind::Pause)
    }

    /// End the session and hand the buffers to the store in the background.
    ///
    /// Sessions without samples, or with fewer than two events, are discarded.
    /// The buffers are empty afterwards either way. Store failures are logged
    /// and never reach the caller.
    pub fn stop(&self) -> Transition {
        let _guard = lock(&self.transition);

        if self.state() == SessionState::Stopped {
            return Transition::Ignored;
        }

        // nessun fix dopo questo punto
        self.source.unsubscribe();

        let (samples, events) = {
            let mut b = lock(&self.buffers);
            b.push_event(self.clock.now(), EventKind::Stop);
            b.state = SessionState::Stopped;
            (
                std::mem::take(&mut b.samples),
                std::mem::take(&mut b.events),
            )
        };

        log::debug!(
            "session stop: samples={} events={}",
            samples.len(),
            events.len()
        );

        if samples.is_empty() || events.len() < 2 {
            log::info!("discarding empty session ({} events)", events.len());
            return Transition::Applied(EventKind::Stop);
        }

        self.finalize(samples, events);
        Transition::Applied(EventKind::Stop)
    }

    fn finalize(&self, samples: Vec<Sample>, events: Vec<ControlEvent>) {
        let store = Arc::clone(&self.store);

        self.executor.execute(Box::new(move || {
            let encoded = codec::encode_samples(&samples)
                .and_then(|path| codec::encode_events(&events).map(|ev| (path, ev)));

            let (path, encoded_events) = match encoded {
                Ok(pair) => pair,
                Err(e) => {
                    log::error!("cannot encode finished session: {e}");
                    return;
                }
            };

            match store.insert(&path, &encoded_events) {
                Ok(rec) => log::info!(
                    "track #{} saved ({} samples)",
                    rec.id,
                    samples.len()
                ),
                Err(e) => log::error!("failed to save track: {e}"),
            }
        }));
    }

    fn sink(&self) -> FixSink {
        let buffers = Arc::clone(&self.buffers);
        Arc::new(move |sample: Sample| {
            let mut b = lock(&buffers);
            if b.state == SessionState::Running {
                b.samples.push(sample);
            } else {
                log::trace!("dropping fix received while {}", b.state.as_str());
            }
        })
    }
}
