//! UseCase 層
//!
//! Relay のライフサイクル（接続開始・メッセージ中継・接続終了）を
//! ユースケースとして実装し、`RelayEngine` がトランスポートからのコールバックを振り分けます。

mod close_connection;
mod engine;
mod error;
mod get_relay_state;
mod open_connection;
mod relay_message;

pub use close_connection::CloseConnectionUseCase;
pub use engine::{ConnectionLifecycle, RelayEngine};
pub use error::{OpenConnectionError, RelayMessageError};
pub use get_relay_state::{ConnectionSummary, GetRelayStateUseCase, RelayState};
pub use open_connection::OpenConnectionUseCase;
pub use relay_message::RelayMessageUseCase;
