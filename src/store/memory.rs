//! In-memory store for tests and local demos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{LedgerStore, StoreError};
use crate::models::points::PointsTransaction;
use crate::models::proposal::{Proposal, ProposalWithVotes, Vote};

/// Thread-safe in-memory store. Can be told to fail every read to simulate
/// an outage, and counts how many round trips it has served.
#[derive(Default)]
pub struct MemoryStore {
    proposals: Mutex<Vec<Proposal>>,
    votes: Mutex<Vec<Vote>>,
    transactions: Mutex<Vec<PointsTransaction>>,
    failure: Mutex<Option<String>>,
    round_trips: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_proposal(&self, proposal: Proposal) {
        lock(&self.proposals).push(proposal);
    }

    pub fn insert_vote(&self, vote: Vote) {
        lock(&self.votes).push(vote);
    }

    pub fn insert_transaction(&self, tx: PointsTransaction) {
        lock(&self.transactions).push(tx);
    }

    /// Make every subsequent read fail with `StoreError::Unavailable`.
    pub fn fail_with(&self, message: &str) {
        *lock(&self.failure) = Some(message.to_string());
    }

    /// Number of reads served (or attempted) so far.
    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::SeqCst)
    }

    fn begin_round_trip(&self) -> Result<(), StoreError> {
        self.round_trips.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn join(&self, proposal: &Proposal, votes: &[Vote]) -> ProposalWithVotes {
        ProposalWithVotes {
            proposal: proposal.clone(),
            votes: votes
                .iter()
                .filter(|v| v.proposal_id == proposal.id)
                .cloned()
                .collect(),
        }
    }
}

impl LedgerStore for MemoryStore {
    async fn fetch_proposals_with_votes(&self) -> Result<Vec<ProposalWithVotes>, StoreError> {
        self.begin_round_trip()?;
        let votes = lock(&self.votes);
        Ok(lock(&self.proposals)
            .iter()
            .map(|p| self.join(p, &votes))
            .collect())
    }

    async fn fetch_proposal_with_votes(
        &self,
        id: i64,
    ) -> Result<Option<ProposalWithVotes>, StoreError> {
        self.begin_round_trip()?;
        let votes = lock(&self.votes);
        Ok(lock(&self.proposals)
            .iter()
            .find(|p| p.id == id)
            .map(|p| self.join(p, &votes)))
    }

    async fn fetch_transactions(
        &self,
        wallet: &str,
        limit: u64,
    ) -> Result<Vec<PointsTransaction>, StoreError> {
        self.begin_round_trip()?;
        let mut rows: Vec<PointsTransaction> = lock(&self.transactions)
            .iter()
            .filter(|tx| tx.wallet_address == wallet)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}
