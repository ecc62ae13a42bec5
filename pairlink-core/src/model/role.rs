use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Offerer,
    Answerer,
}

impl Role {
    pub fn is_offerer(self) -> bool {
        matches!(self, Role::Offerer)
    }

    pub fn from_is_offerer(is_offerer: bool) -> Self {
        if is_offerer {
            Role::Offerer
        } else {
            Role::Answerer
        }
    }

    /// The role on the other end of the room.
    pub fn counterpart(self) -> Self {
        match self {
            Role::Offerer => Role::Answerer,
            Role::Answerer => Role::Offerer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Offerer => f.write_str("offerer"),
            Role::Answerer => f.write_str("answerer"),
        }
    }
}

/// A joined room. Fixed for the lifetime of a peer session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    room_id: RoomId,
    role: Role,
}

impl Session {
    pub fn new(room_id: RoomId, role: Role) -> Self {
        Self { room_id, role }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
