use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::InternalServerError;

/// Errors raised by the upstream feed client.
///
/// All of these are transient from the sync loop's perspective: the current
/// tick is aborted with no store mutation and the scheduler retries on its
/// normal cadence.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Feed returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Feed token acquisition failed: {0}")]
    Token(String),
    #[error("Malformed feed payload: {0}")]
    MalformedPayload(String),
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
