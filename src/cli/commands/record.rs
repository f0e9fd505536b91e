use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::executor::ThreadExecutor;
use crate::core::positioning::ReplaySource;
use crate::core::record::RecordLogic;
use crate::core::remote::RemoteControlBridge;
use crate::core::session::RecordingSession;
use crate::db::store::SqliteTrackStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::path::expand_tilde;
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        replay,
        interval_ms,
    } = cmd
    {
        let interval = interval_ms
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or_else(|| cfg.replay_interval());

        let clock = Arc::new(SystemClock);
        let source = Arc::new(ReplaySource::from_csv(
            &expand_tilde(replay),
            interval,
            clock.clone(),
        )?);
        let store = Arc::new(SqliteTrackStore::open(&cfg.database)?);
        let executor = Arc::new(ThreadExecutor::new());

        let session = Arc::new(RecordingSession::new(
            source.clone(),
            store,
            executor.clone(),
            clock,
        ));
        let bridge = RemoteControlBridge::new(Arc::clone(&session));

        header("openbrd recorder");
        info(format!(
            "Replaying {} point(s) every {} ms; remote '{}' via `remote <byte>`.",
            source.len(),
            interval.as_millis(),
            cfg.remote_device_name
        ));
        info("Commands: start, pause, stop, remote <byte>, status, quit");

        let summary = RecordLogic::run(&session, &bridge, io::stdin().lock())?;

        // attende che i salvataggi in background siano completati
        executor.wait_idle();

        success(format!(
            "Recorder closed: {} applied, {} ignored, {} rejected.",
            summary.applied, summary.ignored, summary.rejected
        ));
    }
    Ok(())
}
