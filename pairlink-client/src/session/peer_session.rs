use crate::error::{Error, Result};
use crate::session::SessionEvent;
use crate::transport::PeerTransport;
use pairlink_core::{ConnectionState, NegotiationState, Role, RoomId, Session};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// A started handshake and, once negotiated, the chat channel.
///
/// Dropping the session stops its pollers.
pub struct PeerSession {
    session: Session,
    transport: Arc<dyn PeerTransport>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl PeerSession {
    pub(crate) fn new(
        session: Session,
        transport: Arc<dyn PeerTransport>,
        events: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Self {
        Self {
            session,
            transport,
            events,
            tasks: Vec::new(),
        }
    }

    pub(crate) fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn room_id(&self) -> &RoomId {
        self.session.room_id()
    }

    pub fn role(&self) -> Role {
        self.session.role()
    }

    pub fn transport(&self) -> &Arc<dyn PeerTransport> {
        &self.transport
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.transport.connection_state()
    }

    pub async fn negotiation_state(&self) -> NegotiationState {
        NegotiationState::derive(
            self.transport.signaling_state(),
            self.transport.connection_state(),
            self.transport.has_remote_description().await,
        )
    }

    /// Next event, or `None` once the session has shut down.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Send a chat message over the data channel.
    pub async fn send(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(Error::EmptyMessage);
        }
        self.transport.send_text(text).await
    }

    pub async fn close(mut self) -> Result<()> {
        info!("Closing session for room {}", self.session.room_id());
        self.abort_tasks();
        self.transport.close().await
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for PeerSession {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
