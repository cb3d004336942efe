use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::{feed::FeedError, InternalServerError};

/// Errors raised by a synchronization attempt.
///
/// A failed attempt never leaves a half-replaced dataset: the transaction
/// rolls back and the sync lock is released before the error propagates.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The upstream fetch failed before any store mutation.
    #[error(transparent)]
    Feed(#[from] FeedError),
    /// Database failure inside the replacement transaction.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
