use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::error;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error("no account is registered for this identity")]
    Unregistered,

    #[error("malformed request body: {}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Service(ServiceError::Database(err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::Unregistered => StatusCode::UNAUTHORIZED,
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Service(err) => match err {
                ServiceError::InvalidInput(_) | ServiceError::InvalidRange { .. } => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the log
        let message = match &self {
            Self::Service(ServiceError::Database(err)) => {
                error!("Database error: {err}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
