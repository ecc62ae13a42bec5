use bytes::Bytes;
use pairlink_core::{ConnectionState, IceCandidate};

/// Callbacks raised by a [`PeerTransport`](crate::transport::PeerTransport).
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A local candidate is ready to be published.
    CandidateGenerated(IceCandidate),
    StateChanged(ConnectionState),
    ChannelOpen,
    Message(Bytes),
    ChannelClosed,
}
