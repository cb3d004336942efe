use axum::{extract::State, response::IntoResponse};

use crate::{
    error::Error,
    model::{
        api::{ErrorDto, SyncResultDto},
        app::AppState,
        sync::SyncOutcome,
    },
};

pub static SYNC_TAG: &str = "sync";

/// Trigger a dataset sync outside the schedule
///
/// Runs the same replacement as the background loop. If another instance is
/// already syncing, the request reports `skipped_concurrent` instead of
/// running a second replacement.
#[utoipa::path(
    post,
    path = "/api/sync",
    tag = SYNC_TAG,
    responses(
        (status = 200, description = "Sync finished or was skipped", body = SyncResultDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn trigger_sync(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let outcome = state.sync_service.synchronize().await?;

    let result = match outcome {
        SyncOutcome::Completed(stats) => SyncResultDto {
            outcome: "completed".to_string(),
            stations: stats.stations,
            prices: stats.prices,
        },
        SyncOutcome::SkippedConcurrent => SyncResultDto {
            outcome: "skipped_concurrent".to_string(),
            stations: 0,
            prices: 0,
        },
    };

    Ok(axum::Json(result))
}
