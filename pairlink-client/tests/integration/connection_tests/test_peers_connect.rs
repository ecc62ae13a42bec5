use anyhow::Result;
use pairlink_client::{ClientConfig, Handshake, PeerSession, SessionEvent, TransportConfig};
use pairlink_core::NegotiationState;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{CONNECTION_TIMEOUT_MS, SIGNAL_TIMEOUT_MS, spawn_signaling_server, wait_for_event};

fn local_config(signaling_url: &str) -> ClientConfig {
    let mut config = ClientConfig {
        signaling_url: signaling_url.to_owned(),
        transport: TransportConfig::local(),
        ..Default::default()
    };
    config.handshake.poll_interval = Duration::from_millis(50);
    config
}

/// Wait for `session`'s channel to open and check that by then both sides
/// have completed negotiation.
async fn wait_for_channel(session: &mut PeerSession, remote: &PeerSession) -> Result<()> {
    wait_for_event(session, CONNECTION_TIMEOUT_MS, |e| {
        *e == SessionEvent::ChannelOpen
    })
    .await?;
    assert!(session.negotiation_state().await.is_negotiated());
    assert!(remote.negotiation_state().await.is_negotiated());
    Ok(())
}

#[tokio::test]
async fn test_two_peers_connect_and_chat() -> Result<()> {
    init_tracing();
    let server = spawn_signaling_server().await?;
    let handshake = Handshake::from_config(local_config(&server.url));

    let mut offerer = handshake.start_offerer().await?;
    assert_eq!(
        offerer.negotiation_state().await,
        NegotiationState::OfferSent
    );

    let mut answerer = handshake.start_answerer(offerer.room_id().clone()).await?;

    wait_for_channel(&mut offerer, &answerer).await?;
    wait_for_channel(&mut answerer, &offerer).await?;

    offerer.send("hello from the offerer").await?;
    let received = wait_for_event(&mut answerer, SIGNAL_TIMEOUT_MS, |e| {
        matches!(e, SessionEvent::Message(_))
    })
    .await?;
    assert_eq!(
        received,
        SessionEvent::Message("hello from the offerer".into())
    );

    answerer.send("hello back").await?;
    let received = wait_for_event(&mut offerer, SIGNAL_TIMEOUT_MS, |e| {
        matches!(e, SessionEvent::Message(_))
    })
    .await?;
    assert_eq!(received, SessionEvent::Message("hello back".into()));

    let room = server.room(offerer.room_id());
    assert!(room.is_some_and(|room| room.offer.is_some() && room.answer.is_some()));

    offerer.close().await?;
    answerer.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_messages_keep_their_order() -> Result<()> {
    init_tracing();
    let server = spawn_signaling_server().await?;
    let handshake = Handshake::from_config(local_config(&server.url));

    let mut offerer = handshake.start_offerer().await?;
    let mut answerer = handshake.start_answerer(offerer.room_id().clone()).await?;
    wait_for_channel(&mut offerer, &answerer).await?;
    wait_for_channel(&mut answerer, &offerer).await?;

    let sent: Vec<String> = (0..20).map(|i| format!("message {}", i)).collect();
    for text in &sent {
        answerer.send(text).await?;
    }

    let mut received = Vec::new();
    while received.len() < sent.len() {
        if let SessionEvent::Message(text) = wait_for_event(&mut offerer, SIGNAL_TIMEOUT_MS, |e| {
            matches!(e, SessionEvent::Message(_))
        })
        .await?
        {
            received.push(text);
        }
    }
    assert_eq!(received, sent);
    Ok(())
}
