use crate::dbs::DbError;
use crate::gemini::GenerateError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::models::MessageResponse;
use thiserror::Error;

/// Client- and server-facing failures of the HTTP surface. Every variant
/// renders as a `{"message": …}` JSON body with the matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing required value: {0}")]
    MissingField(String),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("{kind} {value} invalid")]
    InvalidId { kind: &'static str, value: String },
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::InvalidBody(_) | ApiError::InvalidId { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Db(_) | ApiError::Generate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Db(e) => {
                tracing::error!("Database error: {e:?}");
                "internal server error".to_string()
            }
            ApiError::Generate(e) => {
                tracing::error!("Greeting generation failed: {e:?}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(MessageResponse { message })).into_response()
    }
}
