use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::Error,
    model::{
        api::{ErrorDto, NearbySearchDto, TrendSeriesDto},
        app::AppState,
    },
    service::{
        nearby::{
            NearbyQuery, NearbySearch, SortBy, SortOrder, DEFAULT_RADIUS_KM, MAX_RADIUS_KM,
            MIN_RADIUS_KM,
        },
        trend::{TrendQuery, TrendService, DEFAULT_PERIOD_DAYS, MAX_PERIOD_DAYS},
    },
};

pub static STATION_TAG: &str = "station";

#[derive(Deserialize, IntoParams)]
pub struct NearbyParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Suburb name or postcode used as the reference point when no
    /// coordinates are given.
    pub suburb: Option<String>,
    /// Search radius in kilometres, clamped to 1..=50.
    pub radius_km: Option<f64>,
    /// Comma-separated fuel type codes.
    pub fuel_types: Option<String>,
    /// Comma-separated brand names.
    pub brands: Option<String>,
    /// Fill volume used to estimate a total cost per price.
    pub volume_litres: Option<f64>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

/// Search for stations near a point, suburb, or postcode
#[utoipa::path(
    get,
    path = "/api/stations/nearby",
    tag = STATION_TAG,
    params(NearbyParams),
    responses(
        (status = 200, description = "Success when searching for nearby stations", body = NearbySearchDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_nearby_stations(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<impl IntoResponse, Error> {
    let query = NearbyQuery {
        latitude: params.latitude,
        longitude: params.longitude,
        suburb: params.suburb,
        radius_km: params
            .radius_km
            .unwrap_or(DEFAULT_RADIUS_KM)
            .clamp(MIN_RADIUS_KM, MAX_RADIUS_KM),
        fuel_types: split_csv(params.fuel_types),
        brands: split_csv(params.brands),
        volume_litres: params.volume_litres.filter(|litres| *litres > 0.0),
        sort_by: params.sort_by.unwrap_or_default(),
        sort_order: params.sort_order.unwrap_or_default(),
    };

    let search = NearbySearch::new(&state.db, &state.location_resolver);
    let result = search.search(&query).await?;

    Ok(axum::Json(result))
}

#[derive(Deserialize, IntoParams)]
pub struct TrendParams {
    /// Restricts the result to one fuel type.
    pub fuel_type: Option<String>,
    /// Period length in days, clamped to 1..=365.
    pub period_days: Option<i64>,
}

/// Get per-fuel price trends for a station
#[utoipa::path(
    get,
    path = "/api/stations/{station_code}/trends",
    tag = STATION_TAG,
    params(
        ("station_code" = String, Path, description = "Upstream station code"),
        TrendParams
    ),
    responses(
        (status = 200, description = "Success when reconstructing price trends", body = Vec<TrendSeriesDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_station_trends(
    State(state): State<AppState>,
    Path(station_code): Path<String>,
    Query(params): Query<TrendParams>,
) -> Result<impl IntoResponse, Error> {
    let query = TrendQuery {
        station_code,
        fuel_type: params.fuel_type,
        period_days: params
            .period_days
            .unwrap_or(DEFAULT_PERIOD_DAYS)
            .clamp(1, MAX_PERIOD_DAYS),
    };

    let series = TrendService::new(&state.db).trends(&query).await?;

    Ok(axum::Json(series))
}

fn split_csv(value: Option<String>) -> Vec<String> {
    value
        .map(|value| {
            value
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
