//! Inbound message parsing and the welcome envelope.
//!
//! Payloads are opaque JSON: they are parsed only to validate and
//! canonicalize them, never interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do with an inbound payload that is not valid JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Record the raw text and log; nothing is broadcast.
    #[default]
    Reject,
    /// Record the raw text and broadcast JSON `null`.
    Forward,
}

/// One inbound message: the raw text as received plus its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    raw: String,
    value: Value,
}

impl InboundMessage {
    /// Decode `raw` as JSON.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value = serde_json::from_str(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// Keep a payload that failed to decode; it broadcasts as `null`.
    pub fn undecodable(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            value: Value::Null,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Compact re-serialization sent to the other connections.
    pub fn broadcast_payload(&self) -> String {
        self.value.to_string()
    }
}

/// `{"last_messages": [...]}` sent once to every newly opened connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeEnvelope {
    pub last_messages: Vec<Value>,
}

impl WelcomeEnvelope {
    /// Build the envelope from raw history entries, oldest first.
    ///
    /// Entries that decode as JSON are embedded as values; anything else is
    /// embedded as a JSON string holding the raw text.
    pub fn from_history<'a>(entries: impl IntoIterator<Item = &'a str>) -> Self {
        let last_messages = entries
            .into_iter()
            .map(|raw| {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            })
            .collect();
        Self { last_messages }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "last_messages": self.last_messages }).to_string()
    }
}
