//! Lifecycle hooks the transport layer invokes into the relay core.
//!
//! `RelayEngine` routes each hook to its use case and owns the logging of
//! connection events, so that no error ever escapes to the transport.

use std::{error::Error, sync::Arc};

use async_trait::async_trait;

use crate::domain::{Connection, ConnectionId};

use super::{
    CloseConnectionUseCase, OpenConnectionUseCase, RelayMessageUseCase, RelayMessageError,
};

/// Callbacks a transport delivers for every connection it manages.
///
/// Per connection the transport calls `on_open` once, then `on_message` for
/// each inbound payload, then `on_close` and/or `on_error`. Calls for one
/// connection never overlap.
#[async_trait]
pub trait ConnectionLifecycle: Send + Sync {
    async fn on_open(&self, connection: Connection);

    async fn on_message(&self, id: &ConnectionId, raw: &str);

    async fn on_close(&self, id: &ConnectionId);

    async fn on_error(&self, id: &ConnectionId, error: &(dyn Error + Send + Sync));
}

/// Broadcast engine wired from the connection use cases.
pub struct RelayEngine {
    open_connection_usecase: Arc<OpenConnectionUseCase>,
    relay_message_usecase: Arc<RelayMessageUseCase>,
    close_connection_usecase: Arc<CloseConnectionUseCase>,
}

impl RelayEngine {
    pub fn new(
        open_connection_usecase: Arc<OpenConnectionUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        close_connection_usecase: Arc<CloseConnectionUseCase>,
    ) -> Self {
        Self {
            open_connection_usecase,
            relay_message_usecase,
            close_connection_usecase,
        }
    }
}

#[async_trait]
impl ConnectionLifecycle for RelayEngine {
    async fn on_open(&self, connection: Connection) {
        let id = connection.id().clone();
        match self.open_connection_usecase.execute(connection).await {
            Ok(replayed) => {
                tracing::info!("New connection! ({}), replayed {} messages", id, replayed);
            }
            Err(e) => {
                tracing::warn!("Connection '{}' opened without welcome: {}", id, e);
            }
        }
    }

    async fn on_message(&self, id: &ConnectionId, raw: &str) {
        match self.relay_message_usecase.execute(id, raw).await {
            Ok(fan_out) => {
                tracing::debug!(
                    "Relayed message from '{}' to {} connections ({} failed)",
                    id,
                    fan_out.delivered,
                    fan_out.failed
                );
            }
            Err(RelayMessageError::MalformedMessage(e)) => {
                tracing::warn!(
                    "Recorded malformed message from '{}' without broadcasting: {}",
                    id,
                    e
                );
            }
            Err(e @ RelayMessageError::UnknownSender(_)) => {
                tracing::debug!("Dropped message: {}", e);
            }
        }
    }

    async fn on_close(&self, id: &ConnectionId) {
        if self.close_connection_usecase.execute(id).await.is_some() {
            tracing::info!("Connection {} has disconnected", id);
        }
    }

    async fn on_error(&self, id: &ConnectionId, error: &(dyn Error + Send + Sync)) {
        tracing::error!("An error has occurred on connection '{}': {}", id, error);
        self.close_connection_usecase.fail(id).await;
    }
}
