use crate::error::Result;
use async_trait::async_trait;
use pairlink_core::{IceCandidate, Role, RoomId, SessionDescription};

/// Client side of the rendezvous service both peers talk to.
///
/// Lookups return `None`/empty while the counterpart has not published yet;
/// errors are reserved for transport or decoding failures.
#[async_trait]
pub trait SignalingApi: Send + Sync {
    /// Open a new room and return its id.
    async fn create_room(&self) -> Result<RoomId>;

    async fn publish_offer(&self, room_id: &RoomId, offer: &SessionDescription) -> Result<()>;

    async fn fetch_offer(&self, room_id: &RoomId) -> Result<Option<SessionDescription>>;

    async fn publish_answer(&self, room_id: &RoomId, answer: &SessionDescription) -> Result<()>;

    async fn fetch_answer(&self, room_id: &RoomId) -> Result<Option<SessionDescription>>;

    /// Publish one of `role`'s local candidates.
    async fn publish_candidate(
        &self,
        room_id: &RoomId,
        candidate: &IceCandidate,
        role: Role,
    ) -> Result<()>;

    /// Candidates published by the peer opposite to `role`.
    async fn fetch_candidates(&self, room_id: &RoomId, role: Role) -> Result<Vec<IceCandidate>>;
}
