//! UseCase: 接続開始処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - OpenConnectionUseCase::execute() メソッド
//! - 接続の登録と welcome envelope（直近の履歴）の送信
//!
//! ### なぜこのテストが必要か
//! - 新規接続は登録直後に履歴を古い順で受け取る必要がある
//! - 登録された接続は以降のブロードキャスト対象になる
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴が空の状態での接続、履歴がある状態での接続
//! - 異常系：welcome envelope の送信失敗

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Connection, Relay, WelcomeEnvelope};

use super::error::OpenConnectionError;

/// 接続開始のユースケース
pub struct OpenConnectionUseCase {
    /// Registry と履歴を保持する Relay
    relay: Arc<Mutex<Relay>>,
}

impl OpenConnectionUseCase {
    /// 新しい OpenConnectionUseCase を作成
    pub fn new(relay: Arc<Mutex<Relay>>) -> Self {
        Self { relay }
    }

    /// 接続開始を実行
    ///
    /// 登録と welcome envelope の送信は同じロックの中で行うため、
    /// 新規接続が履歴より先にブロードキャストを受け取ることはない。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - welcome envelope に含めた履歴の件数
    /// * `Err(OpenConnectionError)` - welcome envelope の送信失敗（接続は登録済みのまま）
    pub async fn execute(&self, connection: Connection) -> Result<usize, OpenConnectionError> {
        let mut relay = self.relay.lock().await;

        // 1. Registry に登録し、現在の履歴を取得
        let history = relay.open(connection.clone());

        // 2. welcome envelope を送信
        let envelope = WelcomeEnvelope::from_history(history.iter().map(String::as_str));
        connection.send(envelope.to_json())?;

        Ok(history.len())
    }
}
