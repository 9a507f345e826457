//! Message classification.
//!
//! A feed line is turned into an [`Event`] in a fixed order of checks that
//! stops at the first failure:
//!
//! 1. locate the first `{` and decode the JSON object from there
//! 2. a top-level `ping` field makes the message a ping
//! 3. `ch`, `ts` and `tick` must be present
//! 4. `tick.asks`, `tick.bids` and `tick.event` must be present
//! 5. every level on both sides must be a `[price, quantity]` pair
//! 6. `tick.event == "snapshot"` is a snapshot, anything else an update

use crate::validation::parse_levels;
use serde_json::{Map, Value};
use tickbook_core::{BookPayload, Error, Event, Result};

/// Top-level field marking a keep-alive message.
pub const FIELD_PING: &str = "ping";
/// Top-level channel identifier field.
pub const FIELD_CHANNEL: &str = "ch";
/// Top-level timestamp field.
pub const FIELD_TIMESTAMP: &str = "ts";
/// Top-level container holding the book levels.
pub const FIELD_TICK: &str = "tick";
/// Ask level list inside `tick`.
pub const FIELD_ASKS: &str = "asks";
/// Bid level list inside `tick`.
pub const FIELD_BIDS: &str = "bids";
/// Event kind inside `tick`.
pub const FIELD_EVENT: &str = "event";

/// Event kind value that marks a full snapshot.
pub const SNAPSHOT_EVENT: &str = "snapshot";

const MESSAGE_FIELDS: [&str; 3] = [FIELD_CHANNEL, FIELD_TIMESTAMP, FIELD_TICK];
const TICK_FIELDS: [&str; 3] = [FIELD_ASKS, FIELD_BIDS, FIELD_EVENT];

/// Classifies a raw feed message.
///
/// The message may carry framing bytes before the JSON object; decoding
/// starts at the first `{`.
///
/// # Errors
/// - `Error::MalformedInput` if no object is found or it fails to decode
/// - `Error::MissingField` if a required field is absent
/// - `Error::InvalidValue` if a field holds a value of the wrong shape
pub fn classify(raw: &[u8]) -> Result<Event> {
    let document = decode_object(raw)?;

    if document.contains_key(FIELD_PING) {
        tracing::trace!("classified ping");
        return Ok(Event::Ping);
    }

    require_fields(&document, &MESSAGE_FIELDS)?;

    let empty = Map::new();
    let tick = document[FIELD_TICK].as_object().unwrap_or(&empty);
    require_fields(tick, &TICK_FIELDS)?;

    let channel = document[FIELD_CHANNEL]
        .as_str()
        .ok_or_else(|| Error::invalid(format!("{FIELD_CHANNEL}: expected a string")))?;
    let timestamp = document[FIELD_TIMESTAMP].as_u64().ok_or_else(|| {
        Error::invalid(format!("{FIELD_TIMESTAMP}: expected an unsigned integer"))
    })?;

    let asks = parse_levels(FIELD_ASKS, &tick[FIELD_ASKS])?;
    let bids = parse_levels(FIELD_BIDS, &tick[FIELD_BIDS])?;

    let kind = tick[FIELD_EVENT]
        .as_str()
        .ok_or_else(|| Error::invalid(format!("{FIELD_EVENT}: expected a string")))?;

    let payload = BookPayload {
        timestamp,
        channel: channel.to_owned(),
        asks,
        bids,
    };

    let event = if kind == SNAPSHOT_EVENT {
        Event::Snapshot(payload)
    } else {
        Event::Update(payload)
    };

    tracing::trace!(kind = event.kind(), timestamp, "classified message");
    Ok(event)
}

/// Classifies a feed line held as text.
///
/// # Errors
/// Same as [`classify`].
pub fn classify_str(line: &str) -> Result<Event> {
    classify(line.as_bytes())
}

fn decode_object(raw: &[u8]) -> Result<Map<String, Value>> {
    let start = raw
        .iter()
        .position(|&b| b == b'{')
        .ok_or_else(|| Error::malformed("no JSON object start found"))?;

    let value: Value =
        serde_json::from_slice(&raw[start..]).map_err(|e| Error::malformed(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::malformed(format!("expected a JSON object, got {other}"))),
    }
}

fn require_fields(object: &Map<String, Value>, fields: &[&'static str]) -> Result<()> {
    match fields.iter().find(|field| !object.contains_key(**field)) {
        Some(field) => Err(Error::MissingField(*field)),
        None => Ok(()),
    }
}
