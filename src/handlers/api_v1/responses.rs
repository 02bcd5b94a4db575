use serde::Serialize;

use crate::models::points::PointsTransaction;

/// List wrapper for API endpoints that return a full collection.
#[derive(Serialize, Debug, Clone)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        ListResponse { items, total }
    }
}

/// Points history for one wallet, echoing the effective limit.
#[derive(Serialize, Debug, Clone)]
pub struct HistoryResponse {
    pub wallet: String,
    pub limit: u64,
    pub items: Vec<PointsTransaction>,
}

/// API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: &str, details: Option<String>) -> Self {
        ApiErrorResponse {
            error: error.to_string(),
            details,
        }
    }
}
