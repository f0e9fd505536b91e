//! Text format used to persist samples and control events.
//!
//! - one sample:  `<epochSeconds>,<latitude>,<longitude>`
//! - one event:   `<epochSeconds>,<kind>` (`Start` | `Pause` | `Stop`)
//! - a sequence:  items joined with `;`, no trailing separator
//!
//! Coordinates are written with the shortest decimal text that parses back to
//! the same `f64`, so a decode of an encode is bit-exact.

use crate::models::control_event::{ControlEvent, EventKind};
use crate::models::sample::Sample;
use thiserror::Error;

const ITEMS_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ',';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("empty payload")]
    Empty,

    #[error("missing ',' separator in item '{0}'")]
    MissingSeparator(String),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid event kind '{0}'")]
    InvalidKind(String),
}

pub fn encode_sample(s: &Sample) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        s.timestamp, s.latitude, s.longitude
    )
}

pub fn encode_event(ev: &ControlEvent) -> String {
    format!("{}{FIELD_SEPARATOR}{}", ev.timestamp, ev.kind.as_token())
}

/// Encode a non-empty list of samples.
pub fn encode_samples(samples: &[Sample]) -> Result<String, FormatError> {
    join_items(samples, encode_sample)
}

/// Encode a non-empty list of control events.
pub fn encode_events(events: &[ControlEvent]) -> Result<String, FormatError> {
    join_items(events, encode_event)
}

fn join_items<T>(items: &[T], encode: fn(&T) -> String) -> Result<String, FormatError> {
    if items.is_empty() {
        return Err(FormatError::Empty);
    }

    let parts: Vec<String> = items.iter().map(encode).collect();
    Ok(parts.join(&ITEMS_SEPARATOR.to_string()))
}

pub fn decode_sample(item: &str) -> Result<Sample, FormatError> {
    let (ts, rest) = split_field(item)?;
    let timestamp = parse_timestamp(ts)?;

    // il resto è "lat,lon": secondo split sulla prima virgola rimasta
    let (lat, lon) = split_field(rest)?;

    Ok(Sample {
        timestamp,
        latitude: parse_coordinate(lat)?,
        longitude: parse_coordinate(lon)?,
    })
}

pub fn decode_event(item: &str) -> Result<ControlEvent, FormatError> {
    let (ts, kind) = split_field(item)?;
    let timestamp = parse_timestamp(ts)?;
    let kind = EventKind::from_token(kind).ok_or_else(|| FormatError::InvalidKind(kind.into()))?;

    Ok(ControlEvent { timestamp, kind })
}

/// Decode a persisted sample list. Any malformed item fails the whole call.
pub fn decode_samples(payload: &str) -> Result<Vec<Sample>, FormatError> {
    split_items(payload)?.map(decode_sample).collect()
}

/// Decode a persisted event list. Any malformed item fails the whole call.
pub fn decode_events(payload: &str) -> Result<Vec<ControlEvent>, FormatError> {
    split_items(payload)?.map(decode_event).collect()
}

fn split_items(payload: &str) -> Result<std::str::Split<'_, char>, FormatError> {
    if payload.is_empty() {
        return Err(FormatError::Empty);
    }
    Ok(payload.split(ITEMS_SEPARATOR))
}

fn split_field(item: &str) -> Result<(&str, &str), FormatError> {
    item.split_once(FIELD_SEPARATOR)
        .ok_or_else(|| FormatError::MissingSeparator(item.into()))
}

fn parse_timestamp(s: &str) -> Result<i64, FormatError> {
    s.parse::<i64>()
        .map_err(|_| FormatError::InvalidTimestamp(s.into()))
}

fn parse_coordinate(s: &str) -> Result<f64, FormatError> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormatError::InvalidCoordinate(s.into())),
    }
}
