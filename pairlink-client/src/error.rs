use pairlink_core::{RoomId, SdpType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("signaling request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed signaling payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("signaling unavailable: {0}")]
    Signaling(String),

    #[error("peer connection error: {0}")]
    WebRtc(#[from] webrtc::Error),

    #[error("peer connection has no local description")]
    MissingLocalDescription,

    #[error("unsupported session description type: {0}")]
    UnsupportedDescription(SdpType),

    #[error("no offer found for room {0}")]
    NoOffer(RoomId),

    #[error("data channel is not open")]
    ChannelNotOpen,

    #[error("refusing to send an empty message")]
    EmptyMessage,
}

pub type Result<T> = std::result::Result<T, Error>;
