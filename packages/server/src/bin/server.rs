//! WebSocket message relay server.
//!
//! Rebroadcasts each message to all other connected clients and greets new
//! clients with the most recent messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin yamabiko-server
//! cargo run --bin yamabiko-server -- --host 0.0.0.0 --port 8080 --history-size 20
//! ```

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio::sync::Mutex;
use yamabiko_server::{
    domain::{DEFAULT_HISTORY_CAPACITY, MalformedPolicy, Relay, RelayConfig},
    ui::Server,
    usecase::{
        CloseConnectionUseCase, GetRelayStateUseCase, OpenConnectionUseCase, RelayEngine,
        RelayMessageUseCase,
    },
};
use yamabiko_shared::logger::setup_logger;

/// How to treat inbound messages that are not valid JSON
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MalformedPolicyArg {
    /// Log and drop the message
    Reject,
    /// Record the raw text and broadcast JSON null
    Forward,
}

impl From<MalformedPolicyArg> for MalformedPolicy {
    fn from(arg: MalformedPolicyArg) -> Self {
        match arg {
            MalformedPolicyArg::Reject => MalformedPolicy::Reject,
            MalformedPolicyArg::Forward => MalformedPolicy::Forward,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "yamabiko-server")]
#[command(about = "WebSocket message relay with rolling history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of recent messages replayed to new connections
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_size: usize,

    /// How to treat inbound messages that are not valid JSON
    #[arg(long, value_enum, default_value_t = MalformedPolicyArg::Reject)]
    malformed_policy: MalformedPolicyArg,
}

impl Args {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            history_capacity: self.history_size,
            malformed_policy: self.malformed_policy.into(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = args.relay_config();
    tracing::debug!("Relay config: {:?}", config);

    // Initialize dependencies in order:
    // 1. Relay (registry + history)
    // 2. UseCases
    // 3. RelayEngine
    // 4. Server

    // 1. Create the Relay aggregate shared by every use case
    let relay = Arc::new(Mutex::new(Relay::new(config.history_capacity)));

    // 2. Create UseCases
    let open_connection_usecase = Arc::new(OpenConnectionUseCase::new(relay.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        relay.clone(),
        config.malformed_policy,
    ));
    let close_connection_usecase = Arc::new(CloseConnectionUseCase::new(relay.clone()));
    let get_relay_state_usecase = Arc::new(GetRelayStateUseCase::new(relay.clone()));

    // 3. Create the engine receiving the transport callbacks
    let relay_engine = Arc::new(RelayEngine::new(
        open_connection_usecase,
        relay_message_usecase,
        close_connection_usecase,
    ));

    // 4. Create and run the server
    let server = Server::new(relay_engine, get_relay_state_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
