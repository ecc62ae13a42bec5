mod peer_transport;
mod transport_event;
mod webrtc_transport;

pub use peer_transport::{PeerTransport, TransportFactory};
pub use transport_event::TransportEvent;
pub use webrtc_transport::{WebRtcTransport, WebRtcTransportFactory};
