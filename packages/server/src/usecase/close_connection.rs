//! UseCase: 接続終了処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CloseConnectionUseCase::execute() / fail() メソッド
//! - Registry からの削除と、エラー時のトランスポートへの close 指示
//!
//! ### なぜこのテストが必要か
//! - 通常の close とエラーの両方が削除を試みるため、2 回目以降は何もしないことを保証
//! - 別の接続を誤って削除しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続の削除
//! - エッジケース：同じ接続の 2 回目の close、エラー後の close

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, Relay};

/// 接続終了のユースケース
pub struct CloseConnectionUseCase {
    /// Registry と履歴を保持する Relay
    relay: Arc<Mutex<Relay>>,
}

impl CloseConnectionUseCase {
    /// 新しい CloseConnectionUseCase を作成
    pub fn new(relay: Arc<Mutex<Relay>>) -> Self {
        Self { relay }
    }

    /// トランスポートが報告した close を処理する
    ///
    /// # Returns
    ///
    /// * `Some(Connection)` - 今回の呼び出しで削除した接続
    /// * `None` - すでに削除済み
    pub async fn execute(&self, id: &ConnectionId) -> Option<Connection> {
        self.relay.lock().await.close(id)
    }

    /// トランスポートエラーを処理する
    ///
    /// Registry から削除し、トランスポートに接続の close を指示する。
    pub async fn fail(&self, id: &ConnectionId) -> Option<Connection> {
        let removed = self.relay.lock().await.close(id);
        if let Some(connection) = &removed {
            connection.close();
        }
        removed
    }
}
