//! Relay configuration.

use super::{history::DEFAULT_HISTORY_CAPACITY, message::MalformedPolicy};

/// Settings of the relay core, resolved by the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Number of recent messages replayed to new connections.
    pub history_capacity: usize,
    /// Handling of inbound payloads that are not valid JSON.
    pub malformed_policy: MalformedPolicy,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            malformed_policy: MalformedPolicy::default(),
        }
    }
}
