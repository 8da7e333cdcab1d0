//! HTTP API DTOs.

use serde::{Deserialize, Serialize};
use yamabiko_shared::time::timestamp_to_jst_rfc3339;

use crate::usecase::{ConnectionSummary, RelayState};

/// Connection entry of `GET /debug/relay`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub id: String,
    pub connected_at: String,
}

/// Response body of `GET /debug/relay`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayStateDto {
    pub connections: Vec<ConnectionDto>,
    pub history: Vec<String>,
    pub history_capacity: usize,
}

impl From<ConnectionSummary> for ConnectionDto {
    fn from(summary: ConnectionSummary) -> Self {
        Self {
            id: summary.id.into_string(),
            connected_at: timestamp_to_jst_rfc3339(summary.connected_at.value()),
        }
    }
}

impl From<RelayState> for RelayStateDto {
    fn from(state: RelayState) -> Self {
        Self {
            connections: state.connections.into_iter().map(Into::into).collect(),
            history: state.history,
            history_capacity: state.history_capacity,
        }
    }
}
