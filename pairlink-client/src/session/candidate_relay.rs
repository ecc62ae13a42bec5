use crate::transport::PeerTransport;
use pairlink_core::IceCandidate;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, error};

/// Applies remote candidates at most once each.
///
/// Candidates arriving before the remote description is set are held back
/// and applied on the first flush after it is.
#[derive(Debug, Default)]
pub struct CandidateRelay {
    seen: HashSet<IceCandidate>,
    pending: VecDeque<IceCandidate>,
}

impl CandidateRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every candidate not seen before. Returns the number queued.
    pub fn accept(&mut self, batch: impl IntoIterator<Item = IceCandidate>) -> usize {
        let mut fresh = 0;
        for candidate in batch {
            if self.seen.insert(candidate.clone()) {
                self.pending.push_back(candidate);
                fresh += 1;
            }
        }
        fresh
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued candidates. Returns how many the transport accepted.
    pub async fn flush(&mut self, transport: &dyn PeerTransport) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        if !transport.has_remote_description().await {
            debug!(
                "Holding {} candidates until the remote description is set",
                self.pending.len()
            );
            return 0;
        }

        let mut applied = 0;
        while let Some(candidate) = self.pending.pop_front() {
            match transport.add_ice_candidate(candidate).await {
                Ok(()) => applied += 1,
                Err(e) => error!("Error adding candidate: {}", e),
            }
        }
        applied
    }
}
