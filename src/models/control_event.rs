use serde::Serialize;
use std::fmt;

/// Lifecycle marker kinds. The variant name is also the persisted token.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventKind {
    Start,
    Pause,
    Stop,
}

impl EventKind {
    /// Convert enum → persisted token
    pub fn as_token(&self) -> &'static str {
        match self {
            EventKind::Start => "Start",
            EventKind::Pause => "Pause",
            EventKind::Stop => "Stop",
        }
    }

    /// Convert persisted token → enum (exact match, case-sensitive)
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "Start" => Some(EventKind::Start),
            "Pause" => Some(EventKind::Pause),
            "Stop" => Some(EventKind::Stop),
            _ => None,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, EventKind::Start)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// One timestamped Start/Pause/Stop marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlEvent {
    pub timestamp: i64, // epoch seconds
    pub kind: EventKind,
}

impl ControlEvent {
    pub fn new(timestamp: i64, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}
