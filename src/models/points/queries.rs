use std::num::IntErrorKind;

use crate::errors::LedgerError;
use crate::store::LedgerStore;
use super::types::*;

/// Rows returned when the caller does not ask for a specific count.
pub const DEFAULT_HISTORY_LIMIT: u64 = 20;

/// Parse a `limit` query parameter. Absent or unparseable values (including
/// negative numbers) fall back to [`DEFAULT_HISTORY_LIMIT`]. Integers too large
/// for `u64` saturate; the store applies its own cap.
pub fn parse_limit(raw: Option<&str>) -> u64 {
    match raw.map(|s| s.trim().parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        _ => DEFAULT_HISTORY_LIMIT,
    }
}

/// Reject a missing or blank wallet address.
pub fn require_wallet(wallet: Option<&str>) -> Result<&str, LedgerError> {
    match wallet {
        Some(w) if !w.trim().is_empty() => Ok(w),
        _ => Err(LedgerError::InvalidRequest(
            "wallet address is required".to_string(),
        )),
    }
}

/// Most recent ledger rows for `wallet`, newest first, at most `limit`.
///
/// A missing or blank wallet is rejected before the store is contacted.
pub async fn get_history<S: LedgerStore>(
    store: &S,
    wallet: Option<&str>,
    limit: Option<u64>,
) -> Result<Vec<PointsTransaction>, LedgerError> {
    let wallet = require_wallet(wallet)?;
    let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let rows = store.fetch_transactions(wallet, limit).await?;
    log::debug!("Loaded {} ledger rows for {wallet} (limit {limit})", rows.len());
    Ok(rows)
}
