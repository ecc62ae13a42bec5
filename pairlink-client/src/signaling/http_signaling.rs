use crate::error::Result;
use crate::signaling::SignalingApi;
use async_trait::async_trait;
use pairlink_core::{
    AnswerBody, AnswerResponse, CandidateBody, CandidatesQuery, CandidatesResponse,
    CreateRoomResponse, IceCandidate, OfferBody, OfferResponse, Role, RoomId, RoomQuery,
    SessionDescription,
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// [`SignalingApi`] over the JSON endpoints under `<base>/api`.
#[derive(Clone)]
pub struct HttpSignaling {
    client: Client,
    base_url: String,
}

impl HttpSignaling {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        self.client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn get<Q: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<R> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        // Decoded by hand so a bad body reports as a payload error, not an HTTP one.
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl SignalingApi for HttpSignaling {
    async fn create_room(&self) -> Result<RoomId> {
        let url = self.endpoint("rooms/create");
        debug!("POST {}", url);

        let bytes = self
            .client
            .post(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: CreateRoomResponse = serde_json::from_slice(&bytes)?;
        Ok(response.room_id)
    }

    async fn publish_offer(&self, room_id: &RoomId, offer: &SessionDescription) -> Result<()> {
        let body = OfferBody {
            room_id: room_id.clone(),
            offer: offer.clone(),
        };
        self.post("offer", &body).await
    }

    async fn fetch_offer(&self, room_id: &RoomId) -> Result<Option<SessionDescription>> {
        let query = RoomQuery {
            room_id: room_id.clone(),
        };
        let response: OfferResponse = self.get("offer", &query).await?;
        Ok(response.offer)
    }

    async fn publish_answer(&self, room_id: &RoomId, answer: &SessionDescription) -> Result<()> {
        let body = AnswerBody {
            room_id: room_id.clone(),
            answer: answer.clone(),
        };
        self.post("answer", &body).await
    }

    async fn fetch_answer(&self, room_id: &RoomId) -> Result<Option<SessionDescription>> {
        let query = RoomQuery {
            room_id: room_id.clone(),
        };
        let response: AnswerResponse = self.get("answer", &query).await?;
        Ok(response.answer)
    }

    async fn publish_candidate(
        &self,
        room_id: &RoomId,
        candidate: &IceCandidate,
        role: Role,
    ) -> Result<()> {
        let body = CandidateBody {
            room_id: room_id.clone(),
            candidate: candidate.clone(),
            is_offerer: role.is_offerer(),
        };
        self.post("candidate", &body).await
    }

    async fn fetch_candidates(&self, room_id: &RoomId, role: Role) -> Result<Vec<IceCandidate>> {
        let query = CandidatesQuery {
            room_id: room_id.clone(),
            is_offerer: role.is_offerer(),
        };
        let response: CandidatesResponse = self.get("candidates", &query).await?;
        Ok(response.candidates)
    }
}
