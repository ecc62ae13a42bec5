use crate::error::Result;
use crate::transport::TransportEvent;
use async_trait::async_trait;
use pairlink_core::{ConnectionState, IceCandidate, Role, SessionDescription, SignalingState};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One peer connection with a single data channel.
///
/// Implementations raise their callbacks as [`TransportEvent`]s on the
/// sender handed to [`TransportFactory::create`].
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Create an offer, install it as local description and return the
    /// resulting local description.
    async fn create_offer(&self) -> Result<SessionDescription>;

    /// Create an answer to the applied remote offer, install it and return
    /// the resulting local description.
    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_remote_description(&self, description: SessionDescription) -> Result<()>;

    async fn has_remote_description(&self) -> bool;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    fn signaling_state(&self) -> SignalingState;

    fn connection_state(&self) -> ConnectionState;

    async fn send_text(&self, text: &str) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds a fresh transport for each session.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// The offerer side creates the data channel; the answerer side waits
    /// for the remote one.
    async fn create(
        &self,
        role: Role,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerTransport>>;
}
