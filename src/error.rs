use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views::{Page, StoreFailureTemplate};

/// Any failure reaching or querying the visit store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("database did not answer within {0:?}")]
    Timeout(Duration),

    #[error("store offline: {0}")]
    Offline(String),

    #[error("invalid store data: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::StoreUnavailable(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Page(StoreFailureTemplate {
                    error: e.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
