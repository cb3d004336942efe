use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use sea_orm::{DatabaseConnection, DbErr};
use serde::Deserialize;

use crate::data::price::PriceRepository;
use crate::data::station::StationRepository;
use crate::model::api::{NearbySearchDto, NearbyStationDto, StationPriceDto};
use crate::service::location::LocationResolver;
use crate::util::brand::BrandCanonicalizer;
use crate::util::geo::{bounding_box, haversine_km, valid_coordinates};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 50.0;

/// Fuel types served by the API. Anything else the feed carries is ignored
/// in search results.
const ALLOWED_FUEL_TYPES: &[&str] = &[
    "E10", "U91", "P95", "P98", "DL", "PDL", "B20", "E85", "LPG",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Distance,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub suburb: Option<String>,
    pub radius_km: f64,
    pub fuel_types: Vec<String>,
    pub brands: Vec<String>,
    pub volume_litres: Option<f64>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for NearbyQuery {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            suburb: None,
            radius_km: DEFAULT_RADIUS_KM,
            fuel_types: Vec::new(),
            brands: Vec::new(),
            volume_litres: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Station search around a reference point.
pub struct NearbySearch<'a> {
    db: &'a DatabaseConnection,
    resolver: &'a LocationResolver,
    brands: BrandCanonicalizer,
}

impl<'a> NearbySearch<'a> {
    /// Creates a new instance of [`NearbySearch`]
    pub fn new(db: &'a DatabaseConnection, resolver: &'a LocationResolver) -> Self {
        Self {
            db,
            resolver,
            brands: BrandCanonicalizer::default(),
        }
    }

    /// Runs the search pipeline: resolve the reference point, pre-filter by
    /// bounding box, filter by exact distance, fuel types, and brands, then
    /// sort. An unresolvable reference yields an empty result with a message
    /// rather than an error.
    pub async fn search(&self, query: &NearbyQuery) -> Result<NearbySearchDto, DbErr> {
        let reference = match (query.latitude, query.longitude) {
            (Some(latitude), Some(longitude)) => {
                if !valid_coordinates(latitude, longitude) {
                    return Ok(empty_result("reference coordinates are out of range"));
                }
                Some((latitude, longitude))
            }
            _ => match query.suburb.as_deref().map(str::trim) {
                Some(suburb) if !suburb.is_empty() => {
                    match self.resolver.resolve(suburb).await? {
                        Some(location) => Some((location.latitude, location.longitude)),
                        None => {
                            return Ok(empty_result(format!(
                                "no location found matching '{suburb}'"
                            )));
                        }
                    }
                }
                _ => None,
            },
        };

        let station_repository = StationRepository::new(self.db);
        let candidates = match reference {
            Some((latitude, longitude)) => {
                let bbox = bounding_box(latitude, longitude, query.radius_km);
                station_repository.find_in_bounding_box(&bbox).await?
            }
            None => station_repository.all().await?,
        };

        let mut rows = Vec::with_capacity(candidates.len());
        for station in candidates {
            // A station with corrupt coordinates is silently excluded.
            if !valid_coordinates(station.latitude, station.longitude) {
                continue;
            }
            let distance_km = reference.map(|(latitude, longitude)| {
                haversine_km(latitude, longitude, station.latitude, station.longitude)
            });
            if distance_km.is_some_and(|distance| distance > query.radius_km) {
                continue;
            }
            rows.push((station, distance_km));
        }

        // Computed before the brand filter so the caller can offer the full
        // brand list for this area.
        let available_brands: Vec<String> = rows
            .iter()
            .map(|(station, _)| station.canonical_brand.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let station_codes: Vec<String> = rows
            .iter()
            .map(|(station, _)| station.station_code.clone())
            .collect();
        let mut prices_by_station: HashMap<String, Vec<entity::price::Model>> = HashMap::new();
        for price in PriceRepository::new(self.db)
            .find_by_station_codes(&station_codes)
            .await?
        {
            prices_by_station
                .entry(price.station_code.clone())
                .or_default()
                .push(price);
        }

        let requested_fuels: Vec<String> = query
            .fuel_types
            .iter()
            .map(|fuel| fuel.trim().to_uppercase())
            .filter(|fuel| !fuel.is_empty())
            .collect();
        let brand_filter: BTreeSet<String> = query
            .brands
            .iter()
            .filter(|brand| !brand.trim().is_empty())
            .map(|brand| self.brands.canonicalize(brand))
            .collect();

        let mut stations = Vec::with_capacity(rows.len());
        for (station, distance_km) in rows {
            if !brand_filter.is_empty() && !brand_filter.contains(&station.canonical_brand) {
                continue;
            }

            let mut station_prices: Vec<StationPriceDto> = prices_by_station
                .remove(&station.station_code)
                .unwrap_or_default()
                .into_iter()
                .filter(|price| fuel_allowed(&price.fuel_type, &requested_fuels))
                .map(|price| StationPriceDto {
                    estimated_total_cost: query
                        .volume_litres
                        .map(|litres| round2(price.price * litres / 100.0)),
                    fuel_type: price.fuel_type,
                    price: price.price,
                    last_updated: price.last_updated,
                })
                .collect();
            if station_prices.is_empty() {
                continue;
            }
            station_prices.sort_by(|a, b| a.fuel_type.cmp(&b.fuel_type));

            stations.push(NearbyStationDto {
                station_code: station.station_code,
                name: station.name,
                brand: station.brand,
                canonical_brand: station.canonical_brand,
                address: station.address,
                suburb: station.suburb,
                postcode: station.postcode,
                latitude: station.latitude,
                longitude: station.longitude,
                distance_km: distance_km.map(round2),
                prices: station_prices,
            });
        }

        sort_stations(&mut stations, query.sort_by, query.sort_order);

        Ok(NearbySearchDto {
            stations,
            available_brands,
            message: None,
        })
    }
}

fn fuel_allowed(fuel_type: &str, requested: &[String]) -> bool {
    ALLOWED_FUEL_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(fuel_type))
        && (requested.is_empty()
            || requested
                .iter()
                .any(|fuel| fuel.eq_ignore_ascii_case(fuel_type)))
}

/// Sorts by distance or cheapest price. Stations missing the sort key go
/// last regardless of direction; ties break on name.
fn sort_stations(stations: &mut [NearbyStationDto], sort_by: SortBy, sort_order: SortOrder) {
    let key = |station: &NearbyStationDto| -> Option<f64> {
        match sort_by {
            SortBy::Distance => station.distance_km,
            SortBy::Price => station
                .prices
                .iter()
                .map(|price| price.price)
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)),
        }
    };

    stations.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => {
            let ordering = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            let ordering = match sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            };
            ordering.then_with(|| a.name.cmp(&b.name))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

fn empty_result(message: impl Into<String>) -> NearbySearchDto {
    NearbySearchDto {
        stations: Vec::new(),
        available_brands: Vec::new(),
        message: Some(message.into()),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
