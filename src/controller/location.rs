use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::Error,
    model::{
        api::{ErrorDto, LocationDto},
        app::AppState,
    },
};

pub static LOCATION_TAG: &str = "location";

/// Resolve a postcode or suburb name to a coordinate
#[utoipa::path(
    get,
    path = "/api/locations/{query}",
    tag = LOCATION_TAG,
    params(
        ("query" = String, Path, description = "Four-digit postcode or suburb name")
    ),
    responses(
        (status = 200, description = "Success when resolving the location", body = LocationDto),
        (status = 404, description = "No location matches the query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<impl IntoResponse, Error> {
    match state.location_resolver.resolve(&query).await? {
        Some(location) => Ok(axum::Json(LocationDto {
            postcode: location.postcode,
            latitude: location.latitude,
            longitude: location.longitude,
            label: location.label,
        })
        .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: format!("No location found matching '{}'", query.trim()),
            }),
        )
            .into_response()),
    }
}
