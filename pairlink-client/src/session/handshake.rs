use crate::config::{ClientConfig, HandshakeConfig};
use crate::error::{Error, Result};
use crate::session::pollers::{poll_candidates, poll_for_answer, poll_for_offer};
use crate::session::{PeerSession, SessionEvent};
use crate::signaling::{HttpSignaling, SignalingApi};
use crate::transport::{PeerTransport, TransportEvent, TransportFactory, WebRtcTransportFactory};
use pairlink_core::{ConnectionState, Role, RoomId, Session, Status};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Drives the offer/answer exchange for either side of a room.
#[derive(Clone)]
pub struct Handshake {
    signaling: Arc<dyn SignalingApi>,
    transports: Arc<dyn TransportFactory>,
    config: HandshakeConfig,
}

impl Handshake {
    pub fn new(
        signaling: Arc<dyn SignalingApi>,
        transports: Arc<dyn TransportFactory>,
        config: HandshakeConfig,
    ) -> Self {
        Self {
            signaling,
            transports,
            config,
        }
    }

    /// HTTP signaling and `webrtc` transports.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(
            Arc::new(HttpSignaling::new(config.signaling_url)),
            Arc::new(WebRtcTransportFactory::new(config.transport)),
            config.handshake,
        )
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Create a room, publish an offer and start waiting for the answer.
    pub async fn start_offerer(&self) -> Result<PeerSession> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let room_id = self.signaling.create_room().await?;
        info!("Room created: {}", room_id);
        let _ = event_tx.send(SessionEvent::Status(Status::green(format!(
            "Room created. Share Room ID: {}",
            room_id
        ))));

        let session = Session::new(room_id, Role::Offerer);
        let mut peer = self.open(session.clone(), event_tx, event_rx).await?;

        if let Err(e) = self.publish_offer(&peer).await {
            error!("Failed to offer room {}: {}", session.room_id(), e);
            if let Err(close_err) = peer.close().await {
                warn!("Failed to close transport: {}", close_err);
            }
            return Err(e);
        }

        peer.track(tokio::spawn(poll_for_answer(
            self.signaling.clone(),
            peer.transport().clone(),
            session.room_id().clone(),
            self.config.poll_interval,
        )));
        peer.track(tokio::spawn(poll_candidates(
            self.signaling.clone(),
            peer.transport().clone(),
            session,
            self.config.poll_interval,
        )));

        Ok(peer)
    }

    async fn publish_offer(&self, peer: &PeerSession) -> Result<()> {
        let offer = peer.transport().create_offer().await?;
        self.signaling.publish_offer(peer.room_id(), &offer).await?;
        info!("Offer published for room {}", peer.room_id());
        Ok(())
    }

    /// Join `room_id` and answer its offer once it is published.
    ///
    /// Returns as soon as the transport exists, so progress can be followed
    /// through [`PeerSession::next_event`] while the offer is awaited. A
    /// join that cannot complete ends with [`SessionEvent::Failed`].
    pub async fn start_answerer(&self, room_id: RoomId) -> Result<PeerSession> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        info!("Joining room: {}", room_id);
        let _ = event_tx.send(SessionEvent::Status(Status::green(format!(
            "Joining room: {}",
            room_id
        ))));

        let session = Session::new(room_id, Role::Answerer);
        let mut peer = self
            .open(session.clone(), event_tx.clone(), event_rx)
            .await?;

        peer.track(tokio::spawn(answer_offer(
            self.signaling.clone(),
            peer.transport().clone(),
            session,
            self.config.clone(),
            event_tx,
        )));

        Ok(peer)
    }

    /// Create the transport and start translating its events.
    async fn open(
        &self,
        session: Session,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
        event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Result<PeerSession> {
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let transport = self.transports.create(session.role(), transport_tx).await?;

        let mut peer = PeerSession::new(session.clone(), transport, event_rx);
        peer.track(tokio::spawn(pump_events(
            session,
            self.signaling.clone(),
            transport_rx,
            event_tx,
        )));

        Ok(peer)
    }
}

/// Answerer side: wait for the offer, answer it, then relay candidates
/// until aborted.
async fn answer_offer(
    signaling: Arc<dyn SignalingApi>,
    transport: Arc<dyn PeerTransport>,
    session: Session,
    config: HandshakeConfig,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
) {
    if let Err(e) =
        negotiate_answer(signaling.as_ref(), transport.as_ref(), &session, &config).await
    {
        let status = match &e {
            Error::NoOffer(_) => {
                error!("No offer found for room {}", session.room_id());
                Status::red("No offer found for room.")
            }
            other => {
                error!("Failed to answer room {}: {}", session.room_id(), other);
                Status::red(format!("Failed to join room: {}", other))
            }
        };
        if let Err(close_err) = transport.close().await {
            warn!("Failed to close transport: {}", close_err);
        }
        let _ = event_tx.send(SessionEvent::Status(status));
        let _ = event_tx.send(SessionEvent::Failed(e.to_string()));
        return;
    }

    poll_candidates(signaling, transport, session, config.poll_interval).await;
}

async fn negotiate_answer(
    signaling: &dyn SignalingApi,
    transport: &dyn PeerTransport,
    session: &Session,
    config: &HandshakeConfig,
) -> Result<()> {
    let offer = poll_for_offer(signaling, session.room_id(), config).await?;
    transport.set_remote_description(offer).await?;
    let answer = transport.create_answer().await?;
    signaling.publish_answer(session.room_id(), &answer).await?;
    info!("Answer published for room {}", session.room_id());
    Ok(())
}

/// Publish local candidates and surface transport callbacks as session events.
async fn pump_events(
    session: Session,
    signaling: Arc<dyn SignalingApi>,
    mut transport_rx: mpsc::Receiver<TransportEvent>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
) {
    while let Some(event) = transport_rx.recv().await {
        match event {
            TransportEvent::CandidateGenerated(candidate) => {
                if let Err(e) = signaling
                    .publish_candidate(session.room_id(), &candidate, session.role())
                    .await
                {
                    warn!(
                        "Failed to publish candidate for room {}: {}",
                        session.room_id(),
                        e
                    );
                }
            }

            TransportEvent::StateChanged(state) => {
                let _ = event_tx.send(SessionEvent::StateChanged(state));

                if state == ConnectionState::Connected {
                    let _ = event_tx.send(SessionEvent::Status(Status::green(
                        "Peer connection established!",
                    )));
                    let _ = event_tx.send(SessionEvent::Connected);
                }
            }

            TransportEvent::ChannelOpen => {
                let _ = event_tx.send(SessionEvent::Status(Status::green(
                    "Data channel open. You can now send messages.",
                )));
                let _ = event_tx.send(SessionEvent::ChannelOpen);
            }

            TransportEvent::Message(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                let _ = event_tx.send(SessionEvent::Message(text));
            }

            TransportEvent::ChannelClosed => {
                let _ = event_tx.send(SessionEvent::ChannelClosed);
            }
        }
    }
}
