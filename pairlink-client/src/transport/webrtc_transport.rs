use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::transport::{PeerTransport, TransportEvent, TransportFactory};
use async_trait::async_trait;
use bytes::Bytes;
use pairlink_core::{
    ConnectionState, IceCandidate, Role, SdpType, SessionDescription, SignalingState,
};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::data_channel::data_channel_state::RTCDataChannelState;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::signaling_state::RTCSignalingState;

type ChannelSlot = Arc<Mutex<Option<Arc<RTCDataChannel>>>>;

/// [`PeerTransport`] backed by a `webrtc` peer connection.
pub struct WebRtcTransport {
    role: Role,
    peer_connection: Arc<RTCPeerConnection>,
    data_channel: ChannelSlot,
}

impl WebRtcTransport {
    pub async fn new(
        role: Role,
        config: TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .into_iter()
                .map(|server| RTCIceServer {
                    urls: server.urls,
                    username: server.username.unwrap_or_default(),
                    credential: server.credential.unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);
        let data_channel: ChannelSlot = Arc::new(Mutex::new(None));

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Connection state ({}): {:?}", role, s);
                    let _ = tx
                        .send(TransportEvent::StateChanged(connection_state_from(s)))
                        .await;
                })
            },
        ));

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx
                    .send(TransportEvent::CandidateGenerated(candidate_from(init)))
                    .await;
            })
        }));

        match role {
            Role::Offerer => {
                let dc = peer_connection
                    .create_data_channel(&config.channel_label, None)
                    .await?;
                wire_data_channel(&dc, event_tx.clone());
                *data_channel.lock().await = Some(dc);
            }
            Role::Answerer => {
                let slot = Arc::clone(&data_channel);
                let dc_tx = event_tx.clone();
                peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
                    let slot = Arc::clone(&slot);
                    let tx = dc_tx.clone();

                    Box::pin(async move {
                        debug!("Remote data channel '{}' announced", dc.label());
                        *slot.lock().await = Some(Arc::clone(&dc));
                        wire_data_channel(&dc, tx);
                    })
                }));
            }
        }

        Ok(Self {
            role,
            peer_connection,
            data_channel,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    async fn local_description(&self) -> Result<SessionDescription> {
        let desc = self
            .peer_connection
            .local_description()
            .await
            .ok_or(Error::MissingLocalDescription)?;
        description_from(desc)
    }
}

fn wire_data_channel(dc: &Arc<RTCDataChannel>, event_tx: mpsc::Sender<TransportEvent>) {
    let open_tx = event_tx.clone();
    let label = dc.label().to_owned();
    dc.on_open(Box::new(move || {
        let tx = open_tx.clone();

        Box::pin(async move {
            info!("Data channel '{}' open", label);
            let _ = tx.send(TransportEvent::ChannelOpen).await;
        })
    }));

    let msg_tx = event_tx.clone();
    dc.on_message(Box::new(move |msg: DataChannelMessage| {
        let tx = msg_tx.clone();

        Box::pin(async move {
            let bytes = Bytes::from(msg.data.to_vec());
            let _ = tx.send(TransportEvent::Message(bytes)).await;
        })
    }));

    let close_tx = event_tx;
    dc.on_close(Box::new(move || {
        let tx = close_tx.clone();

        Box::pin(async move {
            let _ = tx.send(TransportEvent::ChannelClosed).await;
        })
    }));
}

#[async_trait]
impl PeerTransport for WebRtcTransport {
    async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection.set_local_description(offer).await?;
        self.local_description().await
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection.set_local_description(answer).await?;
        self.local_description().await
    }

    async fn set_remote_description(&self, description: SessionDescription) -> Result<()> {
        let desc = match description.sdp_type {
            SdpType::Offer => RTCSessionDescription::offer(description.sdp)?,
            SdpType::Answer => RTCSessionDescription::answer(description.sdp)?,
            other => return Err(Error::UnsupportedDescription(other)),
        };
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn has_remote_description(&self) -> bool {
        self.peer_connection.remote_description().await.is_some()
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment,
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    fn signaling_state(&self) -> SignalingState {
        match self.peer_connection.signaling_state() {
            RTCSignalingState::HaveLocalOffer => SignalingState::HaveLocalOffer,
            RTCSignalingState::HaveRemoteOffer => SignalingState::HaveRemoteOffer,
            RTCSignalingState::HaveLocalPranswer => SignalingState::HaveLocalPranswer,
            RTCSignalingState::HaveRemotePranswer => SignalingState::HaveRemotePranswer,
            RTCSignalingState::Closed => SignalingState::Closed,
            RTCSignalingState::Stable | RTCSignalingState::Unspecified => SignalingState::Stable,
        }
    }

    fn connection_state(&self) -> ConnectionState {
        connection_state_from(self.peer_connection.connection_state())
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        let dc = self
            .data_channel
            .lock()
            .await
            .clone()
            .ok_or(Error::ChannelNotOpen)?;

        if dc.ready_state() != RTCDataChannelState::Open {
            return Err(Error::ChannelNotOpen);
        }

        dc.send_text(text.to_owned()).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

fn connection_state_from(state: RTCPeerConnectionState) -> ConnectionState {
    match state {
        RTCPeerConnectionState::Connecting => ConnectionState::Connecting,
        RTCPeerConnectionState::Connected => ConnectionState::Connected,
        RTCPeerConnectionState::Disconnected => ConnectionState::Disconnected,
        RTCPeerConnectionState::Failed => ConnectionState::Failed,
        RTCPeerConnectionState::Closed => ConnectionState::Closed,
        RTCPeerConnectionState::New | RTCPeerConnectionState::Unspecified => ConnectionState::New,
    }
}

fn description_from(desc: RTCSessionDescription) -> Result<SessionDescription> {
    let sdp_type = match desc.sdp_type {
        RTCSdpType::Offer => SdpType::Offer,
        RTCSdpType::Answer => SdpType::Answer,
        RTCSdpType::Pranswer => SdpType::Pranswer,
        RTCSdpType::Rollback => SdpType::Rollback,
        RTCSdpType::Unspecified => {
            warn!("Local description has no type");
            return Err(Error::MissingLocalDescription);
        }
    };
    Ok(SessionDescription {
        sdp_type,
        sdp: desc.sdp,
    })
}

fn candidate_from(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}

/// Creates one [`WebRtcTransport`] per session from a shared config.
#[derive(Clone, Default)]
pub struct WebRtcTransportFactory {
    config: TransportConfig,
}

impl WebRtcTransportFactory {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TransportFactory for WebRtcTransportFactory {
    async fn create(
        &self,
        role: Role,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerTransport>> {
        let transport = WebRtcTransport::new(role, self.config.clone(), events).await?;
        Ok(Arc::new(transport))
    }
}
