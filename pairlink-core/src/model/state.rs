use serde::{Deserialize, Serialize};

/// Mirror of `RTCPeerConnection.signalingState`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
    HaveLocalPranswer,
    HaveRemotePranswer,
    Closed,
}

/// Mirror of `RTCPeerConnection.connectionState`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Handshake progress as seen by the application.
///
/// Never stored: always derived from what the transport reports.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum NegotiationState {
    Idle,
    OfferSent,
    AnswerReceived,
    Connected,
}

impl NegotiationState {
    pub fn derive(
        signaling: SignalingState,
        connection: ConnectionState,
        has_remote_description: bool,
    ) -> Self {
        if connection == ConnectionState::Connected {
            return NegotiationState::Connected;
        }

        match signaling {
            SignalingState::HaveLocalOffer => NegotiationState::OfferSent,
            SignalingState::Stable if has_remote_description => NegotiationState::AnswerReceived,
            _ => NegotiationState::Idle,
        }
    }

    /// Offer and answer have both been applied on this side.
    pub fn is_negotiated(self) -> bool {
        matches!(
            self,
            NegotiationState::AnswerReceived | NegotiationState::Connected
        )
    }
}
