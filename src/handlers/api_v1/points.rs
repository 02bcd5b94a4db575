use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::points;
use crate::store::LedgerStore;
use super::responses::HistoryResponse;

/// GET /api/v1/points/history - Recent ledger rows for one wallet.
/// Query params: wallet (required), limit (default 20).
pub async fn history<S: LedgerStore + 'static>(
    store: web::Data<S>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let wallet = points::require_wallet(query.get("wallet").map(String::as_str))?;
    let limit = points::parse_limit(query.get("limit").map(String::as_str));

    let items = points::get_history(store.get_ref(), Some(wallet), Some(limit)).await?;

    Ok(HttpResponse::Ok().json(HistoryResponse {
        wallet: wallet.to_string(),
        limit,
        items,
    }))
}
