pub const DEFAULT_SIGNALING_URL: &str = "https://webrtc-signaling.purduehackers.com";

pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

pub const DEFAULT_CHANNEL_LABEL: &str = "chat";
