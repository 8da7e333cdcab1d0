//! WebSocket connection handlers.
//!
//! Each upgraded socket becomes one `Connection`: a writer task drains the
//! connection's outbound queue into the socket, a reader task feeds inbound
//! frames to the relay core, and whichever finishes first ends both.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::task::JoinHandle;
use yamabiko_shared::time::get_jst_timestamp;

use crate::{
    domain::{Connection, ConnectionIdFactory, Timestamp},
    infrastructure::channel::{Outbound, OutboundReceiver, WebSocketChannel},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// The task ends when the queue is closed, when a write fails, or after
/// writing the close frame requested through `Outbound::Close`.
fn pusher_loop(
    mut rx: OutboundReceiver,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            match outbound {
                Outbound::Text(payload) => {
                    if let Err(e) = sender.send(Message::Text(payload.into())).await {
                        tracing::debug!("Failed to write to socket: {}", e);
                        break;
                    }
                }
                Outbound::Close => {
                    if let Err(e) = sender.send(Message::Close(None)).await {
                        tracing::debug!("Failed to send close frame: {}", e);
                    }
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let id = ConnectionIdFactory::generate();
    let (channel, rx) = WebSocketChannel::new();
    let connection = Connection::new(
        id.clone(),
        Timestamp::new(get_jst_timestamp()),
        Arc::new(channel),
    );

    let (sender, mut receiver) = socket.split();

    // The writer must be running before the welcome envelope is queued
    let mut send_task = pusher_loop(rx, sender);

    state.lifecycle.on_open(connection).await;

    let lifecycle = state.lifecycle.clone();
    let recv_id = id.clone();

    // Spawn a task to receive messages from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    lifecycle.on_error(&recv_id, &e).await;
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    lifecycle.on_message(&recv_id, text.as_str()).await;
                }
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => lifecycle.on_message(&recv_id, text).await,
                    Err(e) => {
                        tracing::warn!(
                            "Dropped non UTF-8 binary frame from '{}': {}",
                            recv_id,
                            e
                        );
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Pong(_) => {}
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_id);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // No-op when the error path already removed the connection
    state.lifecycle.on_close(&id).await;
}
