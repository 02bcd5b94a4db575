use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::proposal;
use crate::store::LedgerStore;
use super::responses::ListResponse;

/// GET /api/v1/proposals - Every proposal with its vote tally, newest first.
pub async fn list<S: LedgerStore + 'static>(
    store: web::Data<S>,
) -> Result<HttpResponse, AppError> {
    let items = proposal::list_tallied_proposals(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(items)))
}

/// GET /api/v1/proposals/{id} - Single proposal with its vote tally.
pub async fn read<S: LedgerStore + 'static>(
    store: web::Data<S>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let item = proposal::find_tallied_proposal(store.get_ref(), id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(item))
}
