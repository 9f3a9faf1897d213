//! HTTP error type and its status mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use serde_json::json;
use session::SessionError;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Session(SessionError::NoActiveSession { .. }) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::EmptyCatalog { .. }) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::CatalogLookupFailure(_))
            | ApiError::Catalog(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::MalformedPayload(e.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        ApiError::Internal(format!("session task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("Request rejected ({status}): {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
