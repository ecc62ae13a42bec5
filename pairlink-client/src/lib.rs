mod config;
mod error;
mod session;
mod signaling;
mod transport;

pub use config::{ClientConfig, HandshakeConfig, TransportConfig};
pub use error::{Error, Result};
pub use session::*;
pub use signaling::*;
pub use transport::*;
