mod http_signaling;
mod signaling_api;

pub use http_signaling::HttpSignaling;
pub use signaling_api::SignalingApi;
