use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    response::{ApiResponse, Meta},
    storage::StorageError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    /// A backend call failed; only the generic context is shown to callers.
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("{context}")]
    Upload {
        context: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("Error adding farm crops; farm {farm_id} could not be removed")]
    OrphanedFarm { farm_id: Uuid },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn upload(context: &'static str) -> impl FnOnce(StorageError) -> AppError {
        move |source| match source {
            StorageError::Empty => AppError::BadRequest("image file is empty".into()),
            source => {
                tracing::error!(error = %source, "{context}");
                AppError::Upload { context, source }
            }
        }
    }

    /// Wraps a backend error under a caller-facing message, logging the cause.
    pub fn store(context: &'static str) -> impl FnOnce(DbErr) -> AppError {
        move |source| {
            tracing::error!(error = %source, "{context}");
            AppError::Store { context, source }
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Store { .. }
            | AppError::Upload { .. }
            | AppError::OrphanedFarm { .. }
            | AppError::OrmError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
