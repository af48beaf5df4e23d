//! Engine.IO v4 / Socket.IO v5 text frame decoding.
//!
//! Frames look like `0{"sid":..}` (open), `2` (ping), `40` (connect) or
//! `42["system_metrics",{...}]` (event). A bare JSON object is accepted as a
//! `system_metrics` event so plain WebSocket servers work too.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const METRICS_EVENT: &str = "system_metrics";
pub const PONG: &str = "3";
pub const CONNECT: &str = "40";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Noop,
    Connect,
    Disconnect,
    ConnectError(String),
    Event { name: String, payload: Value },
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("empty frame")]
    Empty,
    #[error("unknown packet type {0:?}")]
    UnknownType(char),
    #[error("malformed packet: {0}")]
    Malformed(&'static str),
    #[error("bad JSON in packet: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn decode(text: &str) -> Result<Frame, WireError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(WireError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '{' => Ok(Frame::Event {
            name: METRICS_EVENT.into(),
            payload: serde_json::from_str(text)?,
        }),
        '0' => Ok(Frame::Open(serde_json::from_str(rest)?)),
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '4' => decode_socket(rest),
        '6' => Ok(Frame::Noop),
        c => Err(WireError::UnknownType(c)),
    }
}

fn decode_socket(packet: &str) -> Result<Frame, WireError> {
    let mut chars = packet.chars();
    let kind = chars.next().ok_or(WireError::Malformed("missing socket.io type"))?;
    let rest = skip_namespace(chars.as_str());
    match kind {
        '0' => Ok(Frame::Connect),
        '1' => Ok(Frame::Disconnect),
        '2' => {
            // optional ack id before the array
            let body = rest.trim_start_matches(|c: char| c.is_ascii_digit());
            let args: Vec<Value> = serde_json::from_str(body)?;
            let mut args = args.into_iter();
            let name = match args.next() {
                Some(Value::String(s)) => s,
                _ => return Err(WireError::Malformed("event name")),
            };
            Ok(Frame::Event {
                name,
                payload: args.next().unwrap_or(Value::Null),
            })
        }
        '4' => {
            let message = serde_json::from_str::<Value>(rest)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| rest.to_owned());
            Ok(Frame::ConnectError(message))
        }
        c => Err(WireError::UnknownType(c)),
    }
}

// `/admin,` prefix; the default namespace has none.
fn skip_namespace(s: &str) -> &str {
    if s.starts_with('/') {
        match s.find(',') {
            Some(i) => &s[i + 1..],
            None => "",
        }
    } else {
        s
    }
}
