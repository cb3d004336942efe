//! Error types for the Fuelwatch server.
//!
//! Domain-specific error enums (configuration, upstream feed, sync) are
//! aggregated into a single [`Error`] type with `thiserror` `#[from]`
//! conversions. All errors implement `IntoResponse` so controller handlers
//! can return them directly; anything without a specific mapping falls back
//! to a logged 500 via [`InternalServerError`].

pub mod config;
pub mod feed;
pub mod sync;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{config::ConfigError, feed::FeedError, sync::SyncError},
    model::api::ErrorDto,
};

/// Main error type for the Fuelwatch server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Upstream feed error (token acquisition, fetch, payload decoding).
    #[error(transparent)]
    FeedError(#[from] FeedError),
    /// Synchronization error (mapping or dataset replacement failure).
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::FeedError(err) => err.into_response(),
            Self::SyncError(err) => err.into_response(),
            Self::DbErr(err) => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 response.
///
/// Logs the full error message for debugging but returns a generic message to
/// the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
