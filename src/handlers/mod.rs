pub mod api_v1;

use actix_web::HttpResponse;

/// GET /health - Liveness probe. Does not touch the store.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
