//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ChannelError;

/// 接続開始処理のエラー
#[derive(Debug, Error)]
pub enum OpenConnectionError {
    /// welcome envelope の送信に失敗
    #[error("failed to deliver welcome envelope: {0}")]
    WelcomeNotDelivered(#[from] ChannelError),
}

/// メッセージ中継処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayMessageError {
    /// 受信したペイロードが JSON として不正
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// 送信元の接続がすでに Registry に存在しない
    #[error("connection '{0}' is not open")]
    UnknownSender(String),
}
