//! Shared test infrastructure.
//!
//! - `MemoryStore` seeding helpers for pipeline and HTTP tests
//! - `setup_test_db()` for the PostgreSQL store tests (needs `TEST_DATABASE_URL`)

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::postgres::PgPoolOptions;

use govledger::db::MIGRATOR;
use govledger::models::points::PointsTransaction;
use govledger::models::proposal::{Proposal, RawWeight, Vote};
use govledger::store::{MemoryStore, PgStore};

// ============================================================================
// TIME
// ============================================================================

/// Fixed base instant so ordering assertions are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

/// `base_time()` shifted by `minutes`.
pub fn at(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

// ============================================================================
// MEMORY STORE SEEDING
// ============================================================================

pub fn proposal(id: i64, created_minutes: i64) -> Proposal {
    Proposal {
        id,
        title: format!("Proposal {id}"),
        body: format!("Body of proposal {id}"),
        status: "open".to_string(),
        created_at: at(created_minutes),
    }
}

pub fn vote(proposal_id: i64, choice: &str, weight: impl Into<RawWeight>) -> Vote {
    Vote {
        proposal_id,
        choice: choice.to_string(),
        weight: weight.into(),
    }
}

pub fn transaction(id: i64, wallet: &str, amount: i64, created_minutes: i64) -> PointsTransaction {
    PointsTransaction {
        id,
        wallet_address: wallet.to_string(),
        amount,
        reason: Some(format!("reward #{id}")),
        created_at: at(created_minutes),
    }
}

/// Seed `count` transactions for `wallet`, one minute apart, oldest first.
/// Ids start at `first_id`.
pub fn seed_wallet(store: &MemoryStore, wallet: &str, first_id: i64, count: i64) {
    for i in 0..count {
        store.insert_transaction(transaction(first_id + i, wallet, 10 * (i + 1), i));
    }
}

// ============================================================================
// POSTGRES
// ============================================================================

/// Connect to `TEST_DATABASE_URL`, run migrations and empty the tables.
/// Returns `None` when the variable is unset so callers can skip.
pub async fn setup_test_db() -> Option<PgStore> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    sqlx::query("TRUNCATE points_transactions, votes, proposals RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate tables");

    Some(PgStore::new(pool))
}
