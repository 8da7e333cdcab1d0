//! ConnectionChannel の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket の送信キューを使った実装

pub mod websocket;

pub use websocket::{Outbound, OutboundReceiver, WebSocketChannel};
