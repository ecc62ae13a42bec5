use anyhow::{Context, Result};
use pairlink_client::{Error, PeerTransport, SessionEvent};
use pairlink_core::{ConnectionState, NegotiationState, RoomId, SessionDescription, Status};

use crate::integration::{fake_handshake, fast_config, idle_for, init_tracing};
use crate::utils::{FakeTransportFactory, SIGNAL_TIMEOUT_MS, drain_events, wait_for_event};

#[tokio::test]
async fn test_connection_events_arrive_in_order() -> Result<()> {
    init_tracing();
    let (handshake, _signaling, transports) =
        fake_handshake(fast_config(), FakeTransportFactory::new());

    let mut session = handshake.start_offerer().await?;
    let transport = transports.last().context("no transport created")?;
    drain_events(&mut session);

    transport.simulate_connected().await;

    let expected = vec![
        SessionEvent::StateChanged(ConnectionState::Connected),
        SessionEvent::Status(Status::green("Peer connection established!")),
        SessionEvent::Connected,
        SessionEvent::Status(Status::green(
            "Data channel open. You can now send messages.",
        )),
        SessionEvent::ChannelOpen,
    ];
    for want in expected {
        let got = wait_for_event(&mut session, SIGNAL_TIMEOUT_MS, |_| true).await?;
        assert_eq!(got, want);
    }
    assert_eq!(session.negotiation_state().await, NegotiationState::Connected);
    Ok(())
}

#[tokio::test]
async fn test_messages_flow_once_the_channel_is_open() -> Result<()> {
    init_tracing();
    let (handshake, _signaling, transports) =
        fake_handshake(fast_config(), FakeTransportFactory::new());

    let mut session = handshake.start_offerer().await?;
    let transport = transports.last().context("no transport created")?;

    assert!(matches!(
        session.send("too early").await,
        Err(Error::ChannelNotOpen)
    ));

    transport.simulate_connected().await;
    wait_for_event(&mut session, SIGNAL_TIMEOUT_MS, |e| {
        *e == SessionEvent::ChannelOpen
    })
    .await?;

    session.send("hello").await?;
    assert!(matches!(session.send("").await, Err(Error::EmptyMessage)));
    assert_eq!(transport.sent_messages(), vec!["hello".to_string()]);

    transport.simulate_message("hi back").await;
    let received = wait_for_event(&mut session, SIGNAL_TIMEOUT_MS, |e| {
        matches!(e, SessionEvent::Message(_))
    })
    .await?;
    assert_eq!(received, SessionEvent::Message("hi back".into()));
    Ok(())
}

#[tokio::test]
async fn test_close_stops_polling() -> Result<()> {
    init_tracing();
    let (handshake, signaling, transports) =
        fake_handshake(fast_config(), FakeTransportFactory::new());
    let room_id = RoomId::from("closing");
    signaling.put_offer(&room_id, SessionDescription::offer("v=0"));

    let session = handshake.start_answerer(room_id).await?;
    let transport = transports.last().context("no transport created")?;
    idle_for(3).await;

    session.close().await?;
    assert_eq!(transport.connection_state(), ConnectionState::Closed);

    idle_for(2).await;
    let fetches = signaling.candidate_fetches();
    idle_for(10).await;
    assert_eq!(signaling.candidate_fetches(), fetches);
    Ok(())
}
