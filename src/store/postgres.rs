use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{LedgerStore, StoreError};
use crate::models::points::PointsTransaction;
use crate::models::proposal::{Proposal, ProposalWithVotes, RawWeight, Vote};

/// PostgreSQL-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// One row of the proposal/vote left join. Vote columns are NULL for
/// proposals nobody has voted on.
#[derive(sqlx::FromRow)]
struct JoinedRow {
    id: i64,
    title: String,
    body: String,
    status: String,
    created_at: DateTime<Utc>,
    choice: Option<String>,
    weight: Option<String>,
}

const JOINED_SELECT: &str = "SELECT p.id, p.title, p.body, p.status, p.created_at, \
                                    v.choice, v.weight \
                             FROM proposals p \
                             LEFT JOIN votes v ON v.proposal_id = p.id";

const JOINED_ORDER: &str = "ORDER BY p.created_at DESC, p.id DESC, v.id ASC";

/// Fold joined rows into one entry per proposal. Rows for the same proposal
/// must be adjacent, which the ORDER BY guarantees.
fn group_rows(rows: Vec<JoinedRow>) -> Vec<ProposalWithVotes> {
    let mut grouped: Vec<ProposalWithVotes> = Vec::new();

    for row in rows {
        let same_proposal = grouped
            .last()
            .is_some_and(|last| last.proposal.id == row.id);
        if !same_proposal {
            grouped.push(ProposalWithVotes {
                proposal: Proposal {
                    id: row.id,
                    title: row.title,
                    body: row.body,
                    status: row.status,
                    created_at: row.created_at,
                },
                votes: Vec::new(),
            });
        }

        if let (Some(choice), Some(weight)) = (row.choice, row.weight) {
            if let Some(last) = grouped.last_mut() {
                last.votes.push(Vote {
                    proposal_id: row.id,
                    choice,
                    weight: RawWeight::Text(weight),
                });
            }
        }
    }

    grouped
}

impl LedgerStore for PgStore {
    async fn fetch_proposals_with_votes(&self) -> Result<Vec<ProposalWithVotes>, StoreError> {
        let sql = format!("{JOINED_SELECT} {JOINED_ORDER}");
        let rows = sqlx::query_as::<_, JoinedRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        log::debug!("Fetched {} proposal/vote rows", rows.len());
        Ok(group_rows(rows))
    }

    async fn fetch_proposal_with_votes(
        &self,
        id: i64,
    ) -> Result<Option<ProposalWithVotes>, StoreError> {
        let sql = format!("{JOINED_SELECT} WHERE p.id = $1 {JOINED_ORDER}");
        let rows = sqlx::query_as::<_, JoinedRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(group_rows(rows).into_iter().next())
    }

    async fn fetch_transactions(
        &self,
        wallet: &str,
        limit: u64,
    ) -> Result<Vec<PointsTransaction>, StoreError> {
        let rows = sqlx::query_as::<_, PointsTransaction>(
            "SELECT id, wallet_address, amount, reason, created_at \
             FROM points_transactions \
             WHERE wallet_address = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2",
        )
        .bind(wallet)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
