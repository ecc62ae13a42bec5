use clap::{Args, Parser, Subcommand};
use pairlink::client::{ClientConfig, HandshakeConfig, TransportConfig};
use pairlink::model::IceServerConfig;
use pairlink::utils::{DEFAULT_CHANNEL_LABEL, DEFAULT_SIGNALING_URL, DEFAULT_STUN_ADDR};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pairlink")]
#[command(about = "Peer-to-peer chat over a WebRTC data channel")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a room and wait for a peer to join it.
    Create,
    /// Join a room someone else created.
    Join {
        /// Prompted for when omitted.
        room_id: Option<String>,
    },
}

#[derive(Args)]
pub struct ConnectionArgs {
    #[arg(long, global = true, env = "PAIRLINK_SIGNALING_URL", default_value = DEFAULT_SIGNALING_URL)]
    pub signaling_url: String,

    #[arg(long, global = true, env = "PAIRLINK_POLL_INTERVAL_MS", default_value_t = 1000)]
    pub poll_interval_ms: u64,

    /// Give up joining when no offer shows up in time. Waits forever if unset.
    #[arg(long, global = true, env = "PAIRLINK_OFFER_TIMEOUT_SECS")]
    pub offer_timeout_secs: Option<u64>,

    #[arg(long = "stun", global = true, default_value = DEFAULT_STUN_ADDR)]
    pub stun_urls: Vec<String>,

    #[arg(long, global = true, env = "TURN_URL")]
    pub turn_url: Option<String>,

    #[arg(long, global = true, env = "TURN_USERNAME")]
    pub turn_username: Option<String>,

    #[arg(long, global = true, env = "TURN_CREDENTIAL", hide_env_values = true)]
    pub turn_credential: Option<String>,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        let mut ice_servers: Vec<IceServerConfig> = self
            .stun_urls
            .iter()
            .map(|url| IceServerConfig::stun(url.as_str()))
            .collect();

        if let Some(turn_url) = &self.turn_url {
            ice_servers.push(IceServerConfig {
                urls: vec![turn_url.clone()],
                username: self.turn_username.clone(),
                credential: self.turn_credential.clone(),
            });
        }

        ClientConfig {
            signaling_url: self.signaling_url.clone(),
            handshake: HandshakeConfig {
                poll_interval: Duration::from_millis(self.poll_interval_ms),
                offer_timeout: self.offer_timeout_secs.map(Duration::from_secs),
            },
            transport: TransportConfig {
                ice_servers,
                channel_label: DEFAULT_CHANNEL_LABEL.to_owned(),
            },
        }
    }
}
