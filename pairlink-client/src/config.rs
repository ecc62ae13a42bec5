use pairlink_core::IceServerConfig;
use pairlink_core::utils::{DEFAULT_CHANNEL_LABEL, DEFAULT_SIGNALING_URL, DEFAULT_STUN_ADDR};
use std::time::Duration;

/// Timing of the signaling pollers.
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// Fixed delay between two polls of the same endpoint.
    pub poll_interval: Duration,
    /// How long an answerer waits for an offer. `None` waits forever.
    pub offer_timeout: Option<Duration>,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            offer_timeout: None,
        }
    }
}

/// Peer connection settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServerConfig>,
    pub channel_label: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_ADDR)],
            channel_label: DEFAULT_CHANNEL_LABEL.to_owned(),
        }
    }
}

impl TransportConfig {
    /// Host candidates only. Enough for two peers on the same machine.
    pub fn local() -> Self {
        Self {
            ice_servers: Vec::new(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub signaling_url: String,
    pub handshake: HandshakeConfig,
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            signaling_url: DEFAULT_SIGNALING_URL.to_owned(),
            handshake: HandshakeConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}
