mod candidate_relay;
mod handshake;
mod peer_session;
mod pollers;
mod session_event;

pub use candidate_relay::CandidateRelay;
pub use handshake::Handshake;
pub use peer_session::PeerSession;
pub use session_event::SessionEvent;
