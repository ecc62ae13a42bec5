mod description;
mod role;
mod room;
mod signaling;
mod state;
mod status;

pub use description::{IceCandidate, SdpType, SessionDescription};
pub use role::{Role, Session};
pub use room::RoomId;
pub use signaling::{
    AnswerBody, AnswerResponse, CandidateBody, CandidatesQuery, CandidatesResponse,
    CreateRoomResponse, IceServerConfig, OfferBody, OfferResponse, RoomQuery,
};
pub use state::{ConnectionState, NegotiationState, SignalingState};
pub use status::{Status, StatusColor};
