//! Request and response bodies of the HTTP signaling contract.
//!
//! | method | path                 | body / query                 | response            |
//! |--------|----------------------|------------------------------|---------------------|
//! | POST   | `/api/rooms/create`  |                              | `{roomId}`          |
//! | POST   | `/api/offer`         | `{roomId, offer}`            |                     |
//! | GET    | `/api/offer`         | `?roomId=`                   | `{offer?}`          |
//! | POST   | `/api/answer`        | `{roomId, answer}`           |                     |
//! | GET    | `/api/answer`        | `?roomId=`                   | `{answer?}`         |
//! | POST   | `/api/candidate`     | `{roomId, candidate, isOfferer}` |                 |
//! | GET    | `/api/candidates`    | `?roomId=&isOfferer=1\|0`    | `{candidates: []}`  |

use crate::model::description::{IceCandidate, SessionDescription};
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: RoomId,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferBody {
    pub room_id: RoomId,
    pub offer: SessionDescription,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OfferResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<SessionDescription>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerBody {
    pub room_id: RoomId,
    pub answer: SessionDescription,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<SessionDescription>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateBody {
    pub room_id: RoomId,
    pub candidate: IceCandidate,
    pub is_offerer: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CandidatesResponse {
    #[serde(default)]
    pub candidates: Vec<IceCandidate>,
}

/// `?roomId=` for the offer and answer lookups.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomQuery {
    pub room_id: RoomId,
}

/// `?roomId=&isOfferer=` for the candidate lookup. `is_offerer` names the
/// peer asking; it receives the other side's candidates.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesQuery {
    pub room_id: RoomId,
    #[serde(with = "query_flag")]
    pub is_offerer: bool,
}

/// Booleans travel as `1`/`0` in query strings.
mod query_flag {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"1 or 0",
            )),
        }
    }
}
