//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 履歴への追加（生テキスト）と送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身には決してメッセージが返らないことを保証
//! - 履歴が直近 N 件に保たれることを確認
//! - 不正な JSON も履歴には残り、ブロードキャストの有無だけが MalformedPolicy に従うことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト、11 件目以降の履歴の押し出し
//! - 異常系：不正な JSON（reject / forward）、切断済みの送信者
//! - エッジケース：送信者のみが接続している場合（ブロードキャスト対象なし）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, FanOut, InboundMessage, MalformedPolicy, Relay};

use super::error::RelayMessageError;

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// Registry と履歴を保持する Relay
    relay: Arc<Mutex<Relay>>,
    /// 不正な JSON の扱い
    malformed_policy: MalformedPolicy,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(relay: Arc<Mutex<Relay>>, malformed_policy: MalformedPolicy) -> Self {
        Self {
            relay,
            malformed_policy,
        }
    }

    /// メッセージ中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続 ID
    /// * `raw` - 受信したペイロード（生テキスト）
    ///
    /// # Returns
    ///
    /// * `Ok(FanOut)` - 配信結果（成功数・失敗数）
    /// * `Err(RelayMessageError)` - 不正な JSON（reject 時、履歴には追加済み）または切断済みの送信者
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        raw: &str,
    ) -> Result<FanOut, RelayMessageError> {
        // 1. JSON としてパース（結果の扱いは履歴への追加の後で決める）
        let parsed = InboundMessage::parse(raw);

        let mut relay = self.relay.lock().await;
        if !relay.is_open(sender) {
            return Err(RelayMessageError::UnknownSender(sender.to_string()));
        }

        // 2. 不正な JSON も含め、生テキストを履歴に追加
        relay.record(raw.to_string());

        let message = match parsed {
            Ok(message) => message,
            Err(e) => match self.malformed_policy {
                MalformedPolicy::Reject => {
                    return Err(RelayMessageError::MalformedMessage(e.to_string()));
                }
                MalformedPolicy::Forward => {
                    tracing::warn!(
                        "Forwarding malformed message from '{}' as null: {}",
                        sender,
                        e
                    );
                    InboundMessage::undecodable(raw)
                }
            },
        };

        // 3. 送信者以外の全接続へブロードキャスト
        Ok(relay.broadcast_except(sender, &message.broadcast_payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelError, Connection, Timestamp, connection::MockConnectionChannel};

    fn create_test_relay() -> Arc<Mutex<Relay>> {
        Arc::new(Mutex::new(Relay::new(10)))
    }

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    async fn register(relay: &Arc<Mutex<Relay>>, value: &str, channel: MockConnectionChannel) {
        relay.lock().await.open(Connection::new(
            id(value),
            Timestamp::new(1000),
            Arc::new(channel),
        ));
    }

    /// 何も受信してはいけない接続
    fn silent_channel() -> MockConnectionChannel {
        let mut channel = MockConnectionChannel::new();
        channel.expect_send().never();
        channel
    }

    /// `expected` を 1 回だけ受信する接続
    fn expecting_channel(expected: &'static str) -> MockConnectionChannel {
        let mut channel = MockConnectionChannel::new();
        channel
            .expect_send()
            .withf(move |payload| payload == expected)
            .times(1)
            .returning(|_| Ok(()));
        channel
    }

    #[tokio::test]
    async fn test_relay_message_success() {
        // テスト項目: メッセージが送信者以外に届き、履歴に追加される
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        register(&relay, "bob", expecting_channel(r#""hello""#)).await;
        register(&relay, "charlie", expecting_channel(r#""hello""#)).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作): alice がメッセージを送信
        let result = usecase.execute(&id("alice"), r#""hello""#).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(FanOut {
                delivered: 2,
                failed: 0
            })
        );
        assert_eq!(relay.lock().await.history().snapshot(), vec![r#""hello""#]);
    }

    #[tokio::test]
    async fn test_relay_message_reserializes_payload() {
        // テスト項目: ブロードキャストされるのは再シリアライズされた JSON
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        register(&relay, "bob", expecting_channel(r#"{"text":"hi"}"#)).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作):
        let raw = r#"{ "text" : "hi" }"#;
        let result = usecase.execute(&id("alice"), raw).await;

        // then (期待する結果): 履歴には生テキストが残る
        assert!(result.is_ok());
        assert_eq!(relay.lock().await.history().snapshot(), vec![raw]);
    }

    #[tokio::test]
    async fn test_relay_message_no_broadcast_targets() {
        // テスト項目: 送信者のみが接続している場合、配信対象は空だが履歴には追加される
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作):
        let result = usecase.execute(&id("alice"), r#""hello""#).await;

        // then (期待する結果):
        assert_eq!(result, Ok(FanOut::default()));
        assert_eq!(relay.lock().await.history().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_message_history_keeps_latest_ten() {
        // テスト項目: 12 件送信すると履歴には直近 10 件だけが残る
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作):
        for i in 1..=12 {
            usecase
                .execute(&id("alice"), &format!("\"m{}\"", i))
                .await
                .unwrap();
        }

        // then (期待する結果):
        let expected: Vec<String> = (3..=12).map(|i| format!("\"m{}\"", i)).collect();
        assert_eq!(relay.lock().await.history().snapshot(), expected);
    }

    #[tokio::test]
    async fn test_relay_message_send_failure_is_isolated() {
        // テスト項目: 一部の接続への送信が失敗しても他の接続には届く
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        let mut broken = MockConnectionChannel::new();
        broken
            .expect_send()
            .times(1)
            .returning(|_| Err(ChannelError::Closed));
        register(&relay, "bob", broken).await;
        register(&relay, "charlie", expecting_channel(r#""hello""#)).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作):
        let result = usecase.execute(&id("alice"), r#""hello""#).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(FanOut {
                delivered: 1,
                failed: 1
            })
        );
        assert!(relay.lock().await.is_open(&id("bob")));
    }

    #[tokio::test]
    async fn test_relay_message_rejects_malformed_json() {
        // テスト項目: reject ポリシーでは不正な JSON もブロードキャストされないが、生テキストは履歴に残る
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        register(&relay, "bob", silent_channel()).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作):
        let result = usecase.execute(&id("alice"), "not json").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(RelayMessageError::MalformedMessage(_))
        ));
        assert_eq!(relay.lock().await.history().snapshot(), vec!["not json"]);
    }

    #[tokio::test]
    async fn test_relay_message_forwards_malformed_json_as_null() {
        // テスト項目: forward ポリシーでは生テキストを記録し、null をブロードキャストする
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "alice", silent_channel()).await;
        register(&relay, "bob", expecting_channel("null")).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Forward);

        // when (操作):
        let result = usecase.execute(&id("alice"), "not json").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(relay.lock().await.history().snapshot(), vec!["not json"]);
    }

    #[tokio::test]
    async fn test_relay_message_from_closed_connection_is_ignored() {
        // テスト項目: 切断済みの接続からのメッセージは記録もブロードキャストもされない
        // given (前提条件):
        let relay = create_test_relay();
        register(&relay, "bob", silent_channel()).await;
        let usecase = RelayMessageUseCase::new(relay.clone(), MalformedPolicy::Reject);

        // when (操作):
        let result = usecase.execute(&id("alice"), r#""hello""#).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RelayMessageError::UnknownSender("alice".to_string()))
        );
        assert!(relay.lock().await.history().is_empty());
    }
}
