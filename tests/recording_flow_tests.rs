use openbrd::core::clock::ManualClock;
use openbrd::core::executor::{InlineExecutor, ThreadExecutor};
use openbrd::core::positioning::{FixSink, PositionSource};
use openbrd::core::remote::RemoteControlBridge;
use openbrd::core::session::{RecordingSession, SessionState};
use openbrd::core::tracks::DecodedTrack;
use openbrd::db::store::{SqliteTrackStore, TrackStore};
use openbrd::models::sample::Sample;
use std::sync::{Arc, Mutex};

/// Position source driven by hand from the test body.
#[derive(Default)]
struct HandSource {
    sink: Mutex<Option<FixSink>>,
}

impl HandSource {
    fn fix(&self, ts: i64, lat: f64, lon: f64) {
        let sink = self.sink.lock().unwrap().clone();
        if let Some(s) = sink {
            s(Sample::new(ts, lat, lon));
        }
    }
}

impl PositionSource for HandSource {
    fn subscribe(&self, sink: FixSink) {
        let mut slot = self.sink.lock().unwrap();
        if slot.is_none() {
            *slot = Some(sink);
        }
    }

    fn unsubscribe(&self) {
        self.sink.lock().unwrap().take();
    }
}

#[test]
fn test_session_to_segments_round_trip() {
    let source = Arc::new(HandSource::default());
    let store = Arc::new(SqliteTrackStore::in_memory().unwrap());
    let clock = Arc::new(ManualClock::new(10));

    let session = RecordingSession::new(
        source.clone(),
        store.clone(),
        Arc::new(InlineExecutor),
        clock.clone(),
    );

    session.start();
    source.fix(12, 45.1, 9.1);
    source.fix(18, 45.2, 9.2);

    clock.set(20);
    session.pause();
    // in pausa: scartato
    source.fix(22, 0.0, 0.0);

    clock.set(25);
    session.start();
    source.fix(30, 45.123456789012345, -9.000000000000002);

    clock.set(40);
    session.stop();
    // dopo lo stop la sorgente non consegna più nulla
    source.fix(41, 1.0, 1.0);

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 1);

    let track = DecodedTrack::decode(&all[0]).unwrap();
    assert_eq!(track.samples.len(), 3);
    assert_eq!(track.events.len(), 4);

    let segments = track.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].len(), 2);
    assert_eq!(segments[1].points[0].latitude, 45.123456789012345);
    assert_eq!(segments[1].points[0].longitude, -9.000000000000002);
}

#[test]
fn test_remote_press_drives_session_and_saves_in_background() {
    let source = Arc::new(HandSource::default());
    let store = Arc::new(SqliteTrackStore::in_memory().unwrap());
    let clock = Arc::new(ManualClock::new(100));
    let executor = Arc::new(ThreadExecutor::new());

    let session = Arc::new(RecordingSession::new(
        source.clone(),
        store.clone(),
        executor.clone(),
        clock.clone(),
    ));
    let bridge = RemoteControlBridge::new(Arc::clone(&session));

    bridge.on_signal(&[1]);
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(bridge.sleep_ack(), &[0]);

    source.fix(101, 10.0, 20.0);
    source.fix(102, 10.5, 20.5);

    clock.set(110);
    bridge.on_signal(&[7]);
    assert_eq!(session.state(), SessionState::Stopped);

    executor.wait_idle();

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].events, "100,Start;110,Stop");
    assert_eq!(all[0].path, "101,10,20;102,10.5,20.5");
}

#[test]
fn test_session_without_samples_is_not_stored() {
    let source = Arc::new(HandSource::default());
    let store = Arc::new(SqliteTrackStore::in_memory().unwrap());
    let clock = Arc::new(ManualClock::new(1));

    let session = RecordingSession::new(
        source,
        store.clone(),
        Arc::new(InlineExecutor),
        clock.clone(),
    );

    session.start();
    clock.set(5);
    session.stop();

    assert!(store.list_all().unwrap().is_empty());
}
