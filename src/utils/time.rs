//! Time utilities: epoch seconds ⇄ human-readable text.

use chrono::{DateTime, Local};

/// Epoch seconds rendered in local time, `--` when out of range.
pub fn format_epoch(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "--".to_string())
}

/// `HHh MMm SSs` for a span of seconds.
pub fn format_span(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}h {:02}m {:02}s", s / 3600, (s % 3600) / 60, s % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans() {
        assert_eq!(format_span(0), "00h 00m 00s");
        assert_eq!(format_span(3725), "01h 02m 05s");
        assert_eq!(format_span(-5), "00h 00m 00s");
    }
}
