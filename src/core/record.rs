//! Interactive recording loop: one command per input line.
//!
//! ```text
//! start | pause | stop | remote <byte>... | status | quit
//! ```

use crate::core::remote::RemoteControlBridge;
use crate::core::session::{RecordingSession, Transition};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCommand {
    Start,
    Pause,
    Stop,
    Remote(Vec<u8>),
    Status,
    Quit,
}

impl RecordCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };

        let cmd = match head.to_lowercase().as_str() {
            "start" => RecordCommand::Start,
            "pause" => RecordCommand::Pause,
            "stop" => RecordCommand::Stop,
            "status" => RecordCommand::Status,
            "quit" | "exit" => RecordCommand::Quit,
            "remote" => {
                let bytes = words
                    .map(|w| w.parse::<u8>().map_err(|_| format!("invalid byte '{w}'")))
                    .collect::<Result<Vec<u8>, String>>()?;
                RecordCommand::Remote(bytes)
            }
            other => return Err(format!("unknown command '{other}'")),
        };

        Ok(Some(cmd))
    }
}

/// Counters reported when the loop ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub applied: usize,
    pub ignored: usize,
    pub rejected: usize,
}

fn report(t: Transition, summary: &mut LoopSummary) {
    match t {
        Transition::Applied(kind) => {
            summary.applied += 1;
            success(format!("{kind} recorded"));
        }
        Transition::Ignored => {
            summary.ignored += 1;
            info("Nothing to do in the current state.");
        }
    }
}

pub struct RecordLogic;

impl RecordLogic {
    /// Drive `session` from `input` until `quit` or end of input, then stop it.
    pub fn run<R: BufRead>(
        session: &RecordingSession,
        bridge: &RemoteControlBridge,
        input: R,
    ) -> AppResult<LoopSummary> {
        let mut summary = LoopSummary::default();

        for line in input.lines() {
            let line = line?;

            let cmd = match RecordCommand::parse(&line) {
                Ok(Some(c)) => c,
                Ok(None) => continue,
                Err(e) => {
                    summary.rejected += 1;
                    warning(e);
                    continue;
                }
            };

            match cmd {
                RecordCommand::Start => report(session.start(), &mut summary),
                RecordCommand::Pause => report(session.pause(), &mut summary),
                RecordCommand::Stop => report(session.stop(), &mut summary),
                RecordCommand::Remote(bytes) => match bridge.on_signal(&bytes) {
                    Some(t) => {
                        report(t, &mut summary);
                        log::debug!("remote: write-back {:?}", bridge.sleep_ack());
                    }
                    None => {
                        summary.rejected += 1;
                        warning("Remote signal without value ignored.");
                    }
                },
                RecordCommand::Status => {
                    let snap = session.snapshot();
                    info(format!(
                        "state={} samples={} events={}",
                        snap.state.as_str(),
                        snap.samples,
                        snap.events
                    ));
                }
                RecordCommand::Quit => break,
            }
        }

        // come alla chiusura del servizio: la sessione aperta viene fermata
        if let Transition::Applied(_) = session.stop() {
            summary.applied += 1;
            info("Open session stopped on exit.");
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::executor::InlineExecutor;
    use crate::core::session::SessionState;
    use crate::core::test_support::{FakeSource, FakeStore};
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn parses_commands() {
        assert_eq!(RecordCommand::parse("start"), Ok(Some(RecordCommand::Start)));
        assert_eq!(RecordCommand::parse("  PAUSE "), Ok(Some(RecordCommand::Pause)));
        assert_eq!(RecordCommand::parse(""), Ok(None));
        assert_eq!(
            RecordCommand::parse("remote 1"),
            Ok(Some(RecordCommand::Remote(vec![1])))
        );
        assert_eq!(
            RecordCommand::parse("remote"),
            Ok(Some(RecordCommand::Remote(vec![])))
        );
        assert!(RecordCommand::parse("remote 300").is_err());
        assert!(RecordCommand::parse("jump").is_err());
    }

    #[test]
    fn loop_drives_session_and_stops_on_eof() {
        let source = Arc::new(FakeSource::default());
        let store = Arc::new(FakeStore::default());
        let session = Arc::new(RecordingSession::new(
            source.clone(),
            store.clone(),
            Arc::new(InlineExecutor),
            Arc::new(ManualClock::new(10)),
        ));
        let bridge = RemoteControlBridge::new(Arc::clone(&session));

        let input = Cursor::new("remote 1\nstart\nbogus\nstatus\n");
        let summary = RecordLogic::run(&session, &bridge, input).unwrap();

        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(
            summary,
            LoopSummary {
                applied: 2,
                ignored: 1,
                rejected: 1
            }
        );
        assert!(!source.is_subscribed());
        // nessun campione: sessione scartata
        assert!(store.inserted().is_empty());
    }
}
