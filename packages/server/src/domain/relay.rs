//! `Relay` aggregate: the registry and the rolling history.
//!
//! ## 設計ノート
//!
//! Registry と HistoryBuffer は常に一つのロックの下で一緒に更新されます。
//! ブロードキャストは (接続集合 × 履歴) の一貫したペアを読む必要があるためです。

use super::{
    connection::{Connection, ConnectionId},
    history::HistoryBuffer,
    registry::{FanOut, Registry},
};

/// Connection registry plus rolling history.
#[derive(Debug, Default)]
pub struct Relay {
    registry: Registry,
    history: HistoryBuffer,
}

impl Relay {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            registry: Registry::new(),
            history: HistoryBuffer::new(history_capacity),
        }
    }

    /// Register `connection` and return the history it should be greeted with.
    pub fn open(&mut self, connection: Connection) -> Vec<String> {
        if let Some(previous) = self.registry.add(connection) {
            tracing::warn!("Connection '{}' was registered twice", previous.id());
        }
        self.history.snapshot()
    }

    /// Append a raw inbound payload to the history.
    pub fn record(&mut self, raw: String) {
        self.history.push(raw);
    }

    /// Send `payload` to every connection except `sender`.
    pub fn broadcast_except(&self, sender: &ConnectionId, payload: &str) -> FanOut {
        self.registry
            .for_each_except(sender, |connection| connection.send(payload.to_string()))
    }

    /// Unregister a connection. Returns `None` if it was already gone.
    pub fn close(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.registry.remove(id)
    }

    pub fn is_open(&self, id: &ConnectionId) -> bool {
        self.registry.contains(id)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }
}
