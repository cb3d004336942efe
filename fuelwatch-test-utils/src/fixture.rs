//! Feed payload builders, mock endpoint mounts, and entity row factories.

use chrono::{NaiveDateTime, Utc};
use mockito::{Matcher, Mock, ServerGuard};
use sea_orm::ActiveValue::Set;
use serde_json::{json, Value};

use crate::constant::TEST_ACCESS_TOKEN;

pub fn feed_station_json(code: &str, brand: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "code": code,
        "brand": brand,
        "name": format!("{brand} {code}"),
        "address": "12 Main St, Kingsford NSW 2032",
        "latitude": latitude,
        "longitude": longitude,
    })
}

pub fn feed_price_json(code: &str, fuel_type: &str, price: f64) -> Value {
    json!({
        "stationCode": code,
        "fuelType": fuel_type,
        "price": price,
        "lastUpdated": "02/06/2026 14:05:30",
    })
}

pub fn feed_snapshot_json(stations: &[Value], prices: &[Value]) -> Value {
    json!({ "stations": stations, "prices": prices })
}

/// Mounts the OAuth client-credentials token endpoint.
pub async fn mock_token_endpoint(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("POST", "/oauth/token")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "access_token": TEST_ACCESS_TOKEN, "expires_in": 3600 }).to_string(),
        )
        .expect(hits)
        .create_async()
        .await
}

/// Mounts the full-dataset price endpoint with the given snapshot payload.
pub async fn mock_all_prices_endpoint(server: &mut ServerGuard, body: &Value, hits: usize) -> Mock {
    server
        .mock("GET", "/prices")
        .match_header("apikey", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create_async()
        .await
}

/// Mounts the full-dataset price endpoint returning an upstream failure.
pub async fn mock_all_prices_failure(server: &mut ServerGuard, status: usize) -> Mock {
    server
        .mock("GET", "/prices")
        .with_status(status)
        .create_async()
        .await
}

pub fn station(code: &str, suburb: &str, latitude: f64, longitude: f64) -> entity::station::ActiveModel {
    entity::station::ActiveModel {
        station_code: Set(code.to_string()),
        brand: Set("Shell".to_string()),
        canonical_brand: Set("Shell".to_string()),
        name: Set(format!("Shell {suburb}")),
        address: Set(format!("1 Main St, {suburb} NSW 2000")),
        suburb: Set(Some(suburb.to_string())),
        state: Set(Some("NSW".to_string())),
        postcode: Set(Some("2000".to_string())),
        latitude: Set(latitude),
        longitude: Set(longitude),
        additive_fuel: Set(false),
        last_synced: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
}

pub fn price(code: &str, fuel_type: &str, price: f64) -> entity::price::ActiveModel {
    entity::price::ActiveModel {
        station_code: Set(code.to_string()),
        fuel_type: Set(fuel_type.to_string()),
        price: Set(price),
        price_unit: Set(Some("cents per litre".to_string())),
        description: Set(None),
        last_updated: Set(Some(Utc::now().naive_utc())),
        ..Default::default()
    }
}

pub fn history(
    code: &str,
    fuel_type: &str,
    price: f64,
    recorded_at: NaiveDateTime,
) -> entity::price_history::ActiveModel {
    entity::price_history::ActiveModel {
        station_code: Set(code.to_string()),
        fuel_type: Set(fuel_type.to_string()),
        price: Set(price),
        recorded_at: Set(recorded_at),
        ..Default::default()
    }
}

pub fn postcode_location(
    postcode: &str,
    latitude: f64,
    longitude: f64,
    label: &str,
) -> entity::postcode_location::ActiveModel {
    entity::postcode_location::ActiveModel {
        postcode: Set(postcode.to_string()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        label: Set(Some(label.to_string())),
        manual_override: Set(false),
        ..Default::default()
    }
}
