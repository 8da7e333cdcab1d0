//! Domain layer of the relay core.
//!
//! Connection handles, the registry, the rolling history and the `Relay`
//! aggregate that guards both. Nothing here knows about WebSocket or axum.

pub mod config;
pub mod connection;
pub mod history;
pub mod message;
pub mod registry;
pub mod relay;

pub use config::RelayConfig;
pub use connection::{
    ChannelError, Connection, ConnectionChannel, ConnectionId, ConnectionIdFactory, Timestamp,
};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use message::{InboundMessage, MalformedPolicy, WelcomeEnvelope};
pub use registry::{FanOut, Registry};
pub use relay::Relay;
