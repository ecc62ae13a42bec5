use crate::config::HandshakeConfig;
use crate::error::{Error, Result};
use crate::session::CandidateRelay;
use crate::signaling::SignalingApi;
use crate::transport::PeerTransport;
use pairlink_core::{RoomId, SessionDescription, Session, SignalingState};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

/// Wait until the offerer has published its offer.
pub(crate) async fn poll_for_offer(
    signaling: &dyn SignalingApi,
    room_id: &RoomId,
    config: &HandshakeConfig,
) -> Result<SessionDescription> {
    let started = Instant::now();

    loop {
        sleep(config.poll_interval).await;

        match signaling.fetch_offer(room_id).await {
            Ok(Some(offer)) => {
                info!("Offer received for room {}", room_id);
                return Ok(offer);
            }
            Ok(None) => debug!("No offer in room {} yet", room_id),
            Err(e) => warn!("Offer poll for room {} failed: {}", room_id, e),
        }

        if let Some(timeout) = config.offer_timeout {
            if started.elapsed() >= timeout {
                return Err(Error::NoOffer(room_id.clone()));
            }
        }
    }
}

/// Poll for the answer while the transport still expects one, apply it,
/// then stop.
pub(crate) async fn poll_for_answer(
    signaling: Arc<dyn SignalingApi>,
    transport: Arc<dyn PeerTransport>,
    room_id: RoomId,
    interval: Duration,
) {
    loop {
        sleep(interval).await;

        if transport.signaling_state() != SignalingState::HaveLocalOffer {
            debug!("Room {} no longer expects an answer", room_id);
            return;
        }

        let answer = match signaling.fetch_answer(&room_id).await {
            Ok(Some(answer)) => answer,
            Ok(None) => continue,
            Err(e) => {
                warn!("Answer poll for room {} failed: {}", room_id, e);
                continue;
            }
        };

        // The fetch suspended; state may have moved on meanwhile.
        if transport.signaling_state() == SignalingState::HaveLocalOffer {
            match transport.set_remote_description(answer).await {
                Ok(()) => info!("Answer applied for room {}", room_id),
                Err(e) => error!("Failed to apply answer for room {}: {}", room_id, e),
            }
        }
        return;
    }
}

/// Fetch and apply the counterpart's candidates until aborted.
pub(crate) async fn poll_candidates(
    signaling: Arc<dyn SignalingApi>,
    transport: Arc<dyn PeerTransport>,
    session: Session,
    interval: Duration,
) {
    let mut relay = CandidateRelay::new();

    loop {
        sleep(interval).await;

        match signaling
            .fetch_candidates(session.room_id(), session.role())
            .await
        {
            Ok(batch) => {
                let fresh = relay.accept(batch);
                if fresh > 0 {
                    debug!("{} new remote candidates for room {}", fresh, session.room_id());
                }
            }
            Err(e) => warn!("Candidate poll for room {} failed: {}", session.room_id(), e),
        }

        relay.flush(transport.as_ref()).await;
    }
}
