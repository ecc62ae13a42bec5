use pairlink_core::{ConnectionState, Status};

/// What the application sees of a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Progress line for the status indicator.
    Status(Status),
    /// Raw connection state reported by the transport.
    StateChanged(ConnectionState),
    /// The transport reported `connected`.
    Connected,
    /// The data channel is open; `send` works from here on.
    ChannelOpen,
    /// Text received from the peer.
    Message(String),
    ChannelClosed,
    /// The handshake gave up; the session will not connect.
    Failed(String),
}
