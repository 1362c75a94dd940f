use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{pricing::PricingError, response::ErrorBody};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid request body")]
    InvalidBody(StatusCode, String),

    #[error("Invalid path parameter")]
    InvalidPath(StatusCode, String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Database error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        AppError::BadRequest(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Pricing(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(status, _) | AppError::InvalidPath(status, _) => *status,
            AppError::OrmError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::InvalidBody(_, detail) | AppError::InvalidPath(_, detail) => {
                ErrorBody::with_message(self.to_string(), detail)
            }
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database failure");
                ErrorBody::new(self.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "unexpected failure");
                ErrorBody::new(self.to_string())
            }
            _ => ErrorBody::new(self.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
