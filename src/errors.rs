use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use thiserror::Error;

use crate::handlers::api_v1::responses::ApiErrorResponse;
use crate::store::StoreError;

/// Failures of the tally and history pipelines.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid vote weight {value:?} on proposal {proposal_id}")]
    InvalidWeight { proposal_id: i64, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub enum AppError {
    Ledger(LedgerError),
    Config(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Ledger(e) => write!(f, "{e}"),
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Ledger(LedgerError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            AppError::Ledger(LedgerError::InvalidWeight { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Ledger(LedgerError::Store(StoreError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Ledger(LedgerError::Store(StoreError::Query(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            AppError::Ledger(LedgerError::InvalidRequest(msg)) => {
                log::warn!("{self}");
                ApiErrorResponse::new("Invalid request", Some(msg.clone()))
            }
            AppError::NotFound => ApiErrorResponse::new("Not found", None),
            AppError::Ledger(LedgerError::InvalidWeight { .. }) => {
                log::error!("{self}");
                ApiErrorResponse::new("Invalid vote data", Some(self.to_string()))
            }
            // Store and config details stay in the server log.
            _ => {
                log::error!("{self}");
                let error = if status == StatusCode::SERVICE_UNAVAILABLE {
                    "Service unavailable"
                } else {
                    "Internal server error"
                };
                ApiErrorResponse::new(error, None)
            }
        };
        HttpResponse::build(status).json(body)
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        AppError::Ledger(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Ledger(LedgerError::Store(e))
    }
}
