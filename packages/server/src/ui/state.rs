//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{ConnectionLifecycle, GetRelayStateUseCase};

/// Shared application state
pub struct AppState {
    /// ライフサイクルのコールバック先（Relay のコア）
    pub lifecycle: Arc<dyn ConnectionLifecycle>,
    /// GetRelayStateUseCase（デバッグ用の状態取得）
    pub get_relay_state_usecase: Arc<GetRelayStateUseCase>,
}
