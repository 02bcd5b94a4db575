//! Read access to proposals, votes and the points ledger.
//!
//! The tally builder and history reader depend only on [`LedgerStore`].
//! `PgStore` serves production traffic from PostgreSQL; `MemoryStore` keeps
//! everything in process so the pipelines can be exercised without a database.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use thiserror::Error;

use crate::models::points::PointsTransaction;
use crate::models::proposal::ProposalWithVotes;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// One store round trip per call. Implementations never mutate.
#[allow(async_fn_in_trait)]
pub trait LedgerStore {
    /// Every proposal joined with all of its votes.
    async fn fetch_proposals_with_votes(&self) -> Result<Vec<ProposalWithVotes>, StoreError>;

    /// A single proposal joined with its votes, `None` if it does not exist.
    async fn fetch_proposal_with_votes(
        &self,
        id: i64,
    ) -> Result<Option<ProposalWithVotes>, StoreError>;

    /// Ledger rows owned by `wallet`, newest first, at most `limit` of them.
    async fn fetch_transactions(
        &self,
        wallet: &str,
        limit: u64,
    ) -> Result<Vec<PointsTransaction>, StoreError>;
}
