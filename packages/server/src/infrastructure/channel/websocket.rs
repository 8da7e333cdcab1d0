//! WebSocket を使った ConnectionChannel 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`UnboundedSender<Outbound>`）を保持
//! - コアからの send / close をキューへの投入に変換
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! UI 層の書き込みタスクがキューを読み出してソケットへ書き込むため、
//! コアの send はブロックせず、相手が遅くても他の接続への配信を妨げません。

use tokio::sync::mpsc;

use crate::domain::{ChannelError, ConnectionChannel};

/// 書き込みタスクへの指示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// テキストフレームとして送信
    Text(String),
    /// close フレームを送信して書き込みを終了
    Close,
}

/// 書き込みタスク側の受信口
pub type OutboundReceiver = mpsc::UnboundedReceiver<Outbound>;

/// WebSocket を使った ConnectionChannel 実装
#[derive(Debug, Clone)]
pub struct WebSocketChannel {
    sender: mpsc::UnboundedSender<Outbound>,
}

impl WebSocketChannel {
    /// 送信キューを作成し、チャンネルと書き込みタスク用の受信口を返す
    pub fn new() -> (Self, OutboundReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ConnectionChannel for WebSocketChannel {
    fn send(&self, payload: String) -> Result<(), ChannelError> {
        self.sender
            .send(Outbound::Text(payload))
            .map_err(|_| ChannelError::Closed)
    }

    fn close(&self) {
        // 書き込みタスクが終了済みなら close は不要
        if self.sender.send(Outbound::Close).is_err() {
            tracing::debug!("Close requested on a channel whose writer already finished");
        }
    }
}
