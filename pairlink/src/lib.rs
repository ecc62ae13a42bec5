pub use pairlink_core::model::{Role, RoomId, Session};

pub mod model {
    pub use pairlink_core::model::*;
}

pub mod utils {
    pub use pairlink_core::utils::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use pairlink_client::*;
}
