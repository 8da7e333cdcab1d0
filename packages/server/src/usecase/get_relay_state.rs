//! UseCase: Relay の状態取得（デバッグ用）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Relay, Timestamp};

/// 接続中の 1 接続分の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSummary {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

/// Relay の状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayState {
    /// 接続中の接続（ID 順）
    pub connections: Vec<ConnectionSummary>,
    /// 履歴（古い順、生テキスト）
    pub history: Vec<String>,
    pub history_capacity: usize,
}

/// Relay 状態取得のユースケース
pub struct GetRelayStateUseCase {
    relay: Arc<Mutex<Relay>>,
}

impl GetRelayStateUseCase {
    pub fn new(relay: Arc<Mutex<Relay>>) -> Self {
        Self { relay }
    }

    pub async fn execute(&self) -> RelayState {
        let relay = self.relay.lock().await;

        let mut connections: Vec<ConnectionSummary> = relay
            .registry()
            .connections()
            .map(|connection| ConnectionSummary {
                id: connection.id().clone(),
                connected_at: connection.connected_at(),
            })
            .collect();
        // Sort by id for consistent ordering
        connections.sort_by(|a, b| a.id.cmp(&b.id));

        RelayState {
            connections,
            history: relay.history().snapshot(),
            history_capacity: relay.history().capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Connection, connection::MockConnectionChannel};

    #[tokio::test]
    async fn test_get_relay_state_sorted_snapshot() {
        // テスト項目: 接続は ID 順、履歴は古い順で取得できる
        // given (前提条件):
        let relay = Arc::new(Mutex::new(Relay::new(5)));
        {
            let mut relay = relay.lock().await;
            for (value, at) in [("charlie", 3000), ("alice", 1000), ("bob", 2000)] {
                relay.open(Connection::new(
                    ConnectionId::new(value.to_string()).unwrap(),
                    Timestamp::new(at),
                    Arc::new(MockConnectionChannel::new()),
                ));
            }
            relay.record(r#""m1""#.to_string());
            relay.record(r#""m2""#.to_string());
        }
        let usecase = GetRelayStateUseCase::new(relay);

        // when (操作):
        let state = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<&str> = state.connections.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "charlie"]);
        assert_eq!(state.connections[0].connected_at.value(), 1000);
        assert_eq!(state.history, vec![r#""m1""#, r#""m2""#]);
        assert_eq!(state.history_capacity, 5);
    }
}
