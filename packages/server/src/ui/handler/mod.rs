//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{debug_relay_state, health_check};
pub use websocket::websocket_handler;
