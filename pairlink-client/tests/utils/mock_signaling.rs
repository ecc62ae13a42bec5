use async_trait::async_trait;
use pairlink_client::{Error, Result, SignalingApi};
use pairlink_core::{IceCandidate, Role, RoomId, SessionDescription};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the signaling service holds for one room.
#[derive(Debug, Clone, Default)]
pub struct RoomRecord {
    pub offer: Option<SessionDescription>,
    pub answer: Option<SessionDescription>,
    pub offerer_candidates: Vec<IceCandidate>,
    pub answerer_candidates: Vec<IceCandidate>,
}

impl RoomRecord {
    pub fn candidates_mut(&mut self, role: Role) -> &mut Vec<IceCandidate> {
        match role {
            Role::Offerer => &mut self.offerer_candidates,
            Role::Answerer => &mut self.answerer_candidates,
        }
    }

    pub fn candidates_of(&self, role: Role) -> &[IceCandidate] {
        match role {
            Role::Offerer => &self.offerer_candidates,
            Role::Answerer => &self.answerer_candidates,
        }
    }
}

/// In-memory SignalingApi.
///
/// Candidates are never drained, so every fetch returns the full list
/// published so far, duplicates included.
type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Default)]
pub struct MockSignaling {
    rooms: Arc<Mutex<HashMap<RoomId, RoomRecord>>>,
    failures_left: Arc<AtomicUsize>,
    publish_failures_left: Arc<AtomicUsize>,
    answer_hook: Arc<Mutex<Option<Hook>>>,
    offer_fetches: Arc<AtomicUsize>,
    answer_fetches: Arc<AtomicUsize>,
    candidate_fetches: Arc<AtomicUsize>,
}

impl MockSignaling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` fetches fail as if the network were down.
    pub fn fail_next_fetches(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` offer, answer or candidate publications fail.
    pub fn fail_next_publishes(&self, count: usize) {
        self.publish_failures_left.store(count, Ordering::SeqCst);
    }

    /// Run `hook` each time a fetch finds an answer, before the answer is
    /// handed back to the caller.
    pub fn on_answer_delivered(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.answer_hook.lock().unwrap() = Some(Arc::new(hook));
    }

    fn injected_failure(&self) -> Result<()> {
        take_one(&self.failures_left, "fetch")
    }

    fn injected_publish_failure(&self) -> Result<()> {
        take_one(&self.publish_failures_left, "publish")
    }

    fn rooms(&self) -> MutexGuard<'_, HashMap<RoomId, RoomRecord>> {
        self.rooms.lock().unwrap()
    }

    pub fn room(&self, room_id: &RoomId) -> Option<RoomRecord> {
        self.rooms().get(room_id).cloned()
    }

    pub fn put_offer(&self, room_id: &RoomId, offer: SessionDescription) {
        self.rooms()
            .entry(room_id.clone())
            .or_default()
            .offer = Some(offer);
    }

    pub fn put_answer(&self, room_id: &RoomId, answer: SessionDescription) {
        self.rooms()
            .entry(room_id.clone())
            .or_default()
            .answer = Some(answer);
    }

    pub fn put_candidate(&self, room_id: &RoomId, candidate: IceCandidate, from: Role) {
        self.rooms()
            .entry(room_id.clone())
            .or_default()
            .candidates_mut(from)
            .push(candidate);
    }

    pub fn candidates_from(&self, room_id: &RoomId, from: Role) -> Vec<IceCandidate> {
        self.rooms()
            .get(room_id)
            .map(|room| room.candidates_of(from).to_vec())
            .unwrap_or_default()
    }

    pub fn offer_fetches(&self) -> usize {
        self.offer_fetches.load(Ordering::SeqCst)
    }

    pub fn answer_fetches(&self) -> usize {
        self.answer_fetches.load(Ordering::SeqCst)
    }

    pub fn candidate_fetches(&self) -> usize {
        self.candidate_fetches.load(Ordering::SeqCst)
    }
}

fn take_one(counter: &AtomicUsize, what: &str) -> Result<()> {
    let failed = counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failed {
        tracing::debug!("[MockSignaling] injected {} failure", what);
        return Err(Error::Signaling("injected failure".into()));
    }
    Ok(())
}

#[async_trait]
impl SignalingApi for MockSignaling {
    async fn create_room(&self) -> Result<RoomId> {
        let room_id = RoomId::from(uuid::Uuid::new_v4().to_string());
        tracing::debug!("[MockSignaling] create_room {}", room_id);
        self.rooms().insert(room_id.clone(), RoomRecord::default());
        Ok(room_id)
    }

    async fn publish_offer(&self, room_id: &RoomId, offer: &SessionDescription) -> Result<()> {
        tracing::debug!("[MockSignaling] publish_offer {}", room_id);
        self.injected_publish_failure()?;
        self.put_offer(room_id, offer.clone());
        Ok(())
    }

    async fn fetch_offer(&self, room_id: &RoomId) -> Result<Option<SessionDescription>> {
        self.offer_fetches.fetch_add(1, Ordering::SeqCst);
        self.injected_failure()?;
        Ok(self.room(room_id).and_then(|room| room.offer))
    }

    async fn publish_answer(&self, room_id: &RoomId, answer: &SessionDescription) -> Result<()> {
        tracing::debug!("[MockSignaling] publish_answer {}", room_id);
        self.injected_publish_failure()?;
        self.put_answer(room_id, answer.clone());
        Ok(())
    }

    async fn fetch_answer(&self, room_id: &RoomId) -> Result<Option<SessionDescription>> {
        self.answer_fetches.fetch_add(1, Ordering::SeqCst);
        self.injected_failure()?;
        let answer = self.room(room_id).and_then(|room| room.answer);
        if answer.is_some() {
            let hook = self.answer_hook.lock().unwrap().clone();
            if let Some(hook) = hook {
                hook();
            }
        }
        Ok(answer)
    }

    async fn publish_candidate(
        &self,
        room_id: &RoomId,
        candidate: &IceCandidate,
        role: Role,
    ) -> Result<()> {
        self.injected_publish_failure()?;
        self.put_candidate(room_id, candidate.clone(), role);
        Ok(())
    }

    async fn fetch_candidates(&self, room_id: &RoomId, role: Role) -> Result<Vec<IceCandidate>> {
        self.candidate_fetches.fetch_add(1, Ordering::SeqCst);
        self.injected_failure()?;
        Ok(self.candidates_from(room_id, role.counterpart()))
    }
}

