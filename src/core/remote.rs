//! BLE remote button → session transitions.
//!
//! The peripheral exposes one characteristic. Reading it yields its button
//! state; writing a zero byte back puts it to sleep until the next press.

use crate::core::session::{RecordingSession, Transition};
use std::sync::Arc;

/// Payload written back after every read so the peripheral goes to sleep.
pub const SLEEP_ACK: [u8; 1] = [0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    Start,
    Stop,
}

impl RemoteCommand {
    /// First byte `1` means start, anything else stop. An empty payload
    /// carries no value.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        match payload.first()? {
            1 => Some(RemoteCommand::Start),
            _ => Some(RemoteCommand::Stop),
        }
    }
}

pub struct RemoteControlBridge {
    session: Arc<RecordingSession>,
}

impl RemoteControlBridge {
    pub fn new(session: Arc<RecordingSession>) -> Self {
        Self { session }
    }

    /// Handle one characteristic read. Exactly one session call per payload.
    pub fn on_signal(&self, payload: &[u8]) -> Option<Transition> {
        let Some(cmd) = RemoteCommand::from_payload(payload) else {
            log::warn!("remote: empty characteristic value, ignored");
            return None;
        };

        log::debug!("remote: value {:?} -> {:?}", payload[0], cmd);

        let t = match cmd {
            RemoteCommand::Start => self.session.start(),
            RemoteCommand::Stop => self.session.stop(),
        };
        Some(t)
    }

    pub fn sleep_ack(&self) -> &'static [u8] {
        &SLEEP_ACK
    }
}
