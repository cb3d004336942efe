use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// A single fuel price at a station, with the optional estimated fill cost.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StationPriceDto {
    pub fuel_type: String,
    /// Hundredths of a currency unit per litre.
    pub price: f64,
    pub last_updated: Option<NaiveDateTime>,
    /// `price * volume_litres / 100`, rounded to 2 decimals; only present
    /// when the caller supplied a volume.
    pub estimated_total_cost: Option<f64>,
}

/// A station matched by a nearby search.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NearbyStationDto {
    pub station_code: String,
    pub name: String,
    pub brand: String,
    pub canonical_brand: String,
    pub address: String,
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance from the reference point, rounded to 2 decimals.
    /// Absent when the search had no reference point.
    pub distance_km: Option<f64>,
    pub prices: Vec<StationPriceDto>,
}

/// Result of a nearby search.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NearbySearchDto {
    pub stations: Vec<NearbyStationDto>,
    /// Distinct canonical brands among all bounding-box candidates, computed
    /// before the brand filter so callers can populate a brand filter UI.
    pub available_brands: Vec<String>,
    /// Explanatory message for an empty result (e.g. unresolvable location).
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TrendPointDto {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

/// One fuel type's ordered price series within the requested period.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TrendSeriesDto {
    pub fuel_type: String,
    pub points: Vec<TrendPointDto>,
}

/// A resolved location (postcode or suburb) with its representative coordinate.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub postcode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
}

/// Summary returned by the administrative sync trigger.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SyncResultDto {
    pub outcome: String,
    pub stations: usize,
    pub prices: usize,
}
