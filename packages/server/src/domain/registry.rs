//! Registry of currently open connections.

use std::collections::HashMap;

use super::connection::{ChannelError, Connection, ConnectionId};

/// Outcome of one `Registry::for_each_except` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOut {
    pub delivered: usize,
    pub failed: usize,
}

/// Set of open connections, unique by `ConnectionId`.
#[derive(Debug, Default)]
pub struct Registry {
    connections: HashMap<ConnectionId, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection as a broadcast target.
    ///
    /// Returns the handle previously stored under the same id, if any.
    pub fn add(&mut self, connection: Connection) -> Option<Connection> {
        self.connections.insert(connection.id().clone(), connection)
    }

    /// Unregister a connection. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Apply `f` to every connection except `exclude`.
    ///
    /// A failing connection is logged and skipped; it stays registered until
    /// the transport reports its close.
    pub fn for_each_except<F>(&self, exclude: &ConnectionId, mut f: F) -> FanOut
    where
        F: FnMut(&Connection) -> Result<(), ChannelError>,
    {
        let mut fan_out = FanOut::default();
        for (id, connection) in &self.connections {
            if id == exclude {
                continue;
            }
            match f(connection) {
                Ok(()) => fan_out.delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to deliver message to connection '{}': {}", id, e);
                    fan_out.failed += 1;
                }
            }
        }
        fan_out
    }
}
