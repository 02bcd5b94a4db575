use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a wallet's points ledger. Returned exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PointsTransaction {
    pub id: i64,
    pub wallet_address: String,
    pub amount: i64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
