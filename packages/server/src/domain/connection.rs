//! Connection handle and the channel abstraction the relay core sends through.
//!
//! ## 責務
//!
//! - `ConnectionId`: ログ出力用の安定した識別子
//! - `ConnectionChannel`: トランスポート層が提供する送信・切断の能力
//! - `Connection`: Registry が保持する 1 接続分のハンドル
//!
//! ## 設計ノート
//!
//! コアは WebSocket を知りません。トランスポート層は `ConnectionChannel` を実装し、
//! 接続ごとに `Connection` を生成してコアへ渡します。

use std::{fmt, sync::Arc};

use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of one open connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a `ConnectionId` from an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is empty or only whitespace.
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("ConnectionId must not be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates fresh `ConnectionId`s (UUID v4).
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// Unix timestamp in JST (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Errors reported by a `ConnectionChannel`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The peer's outbound side has gone away.
    #[error("connection channel is closed")]
    Closed,
}

/// Send/close capability of one connection, provided by the transport layer.
///
/// Implementations must not block: `send` either enqueues the payload or
/// fails fast.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectionChannel: Send + Sync {
    /// Queue `payload` for delivery to the peer.
    fn send(&self, payload: String) -> Result<(), ChannelError>;

    /// Ask the transport to close the connection.
    fn close(&self);
}

/// Handle of one open connection, owned by the `Registry` while it is open.
#[derive(Clone)]
pub struct Connection {
    id: ConnectionId,
    connected_at: Timestamp,
    channel: Arc<dyn ConnectionChannel>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        connected_at: Timestamp,
        channel: Arc<dyn ConnectionChannel>,
    ) -> Self {
        Self {
            id,
            connected_at,
            channel,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    pub fn send(&self, payload: String) -> Result<(), ChannelError> {
        self.channel.send(payload)
    }

    pub fn close(&self) {
        self.channel.close()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}
