//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger
/// UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/stations/nearby` - Search for stations around a point or suburb
/// - `GET /api/stations/{station_code}/trends` - Per-fuel price trends
/// - `GET /api/locations/{query}` - Resolve a postcode or suburb name
/// - `POST /api/sync` - Trigger a dataset sync outside the schedule
///
/// The OpenAPI specification is served at `/api/docs/openapi.json` and
/// Swagger UI at `/api/docs`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Fuelwatch", description = "Fuelwatch API"), tags(
        (name = controller::station::STATION_TAG, description = "Station search and trend API routes"),
        (name = controller::location::LOCATION_TAG, description = "Location resolution API routes"),
        (name = controller::sync::SYNC_TAG, description = "Synchronization API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::station::get_nearby_stations))
        .routes(routes!(controller::station::get_station_trends))
        .routes(routes!(controller::location::get_location))
        .routes(routes!(controller::sync::trigger_sync))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
