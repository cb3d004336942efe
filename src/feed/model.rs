use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::util::time::parse_feed_timestamp;

/// One full dataset pull from the upstream feed: the station roster and the
/// current price per (station, fuel type).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSnapshot {
    #[serde(default)]
    pub stations: Vec<FeedStation>,
    #[serde(default)]
    pub prices: Vec<FeedPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStation {
    #[serde(alias = "stationcode")]
    pub code: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Whether the site sells the diesel exhaust additive.
    #[serde(default, alias = "isAdBlueAvailable")]
    pub additive_fuel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPrice {
    #[serde(alias = "stationcode")]
    pub station_code: String,
    #[serde(alias = "fueltype")]
    pub fuel_type: String,
    /// Hundredths of a currency unit per litre, as published upstream.
    pub price: f64,
    #[serde(default, alias = "lastupdated")]
    pub last_updated: Option<String>,
    #[serde(default, alias = "priceunit")]
    pub price_unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FeedPrice {
    /// The row's last-updated timestamp, if it parses. The feed mixes
    /// formats; unparseable values degrade to `None`.
    pub fn parsed_last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
            .as_deref()
            .and_then(parse_feed_timestamp)
    }
}

/// Parameters for the upstream radius-scoped price endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFeedRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}
