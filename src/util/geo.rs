//! Great-circle geometry for nearby searches.

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate kilometres per degree of latitude.
const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Floor for the longitude cosine so a bounding box near the poles widens
/// instead of collapsing or dividing by zero.
const MIN_LONGITUDE_COS: f64 = 0.01;

/// Latitude/longitude rectangle used to pre-filter stations before exact
/// distance computation. Deliberately a superset of the true radius circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Great-circle distance between two coordinates, in kilometres, via the
/// haversine formula.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Bounding box around a point with roughly `radius_km` of slack on each
/// side. Longitude slack scales with latitude, with the cosine floored so the
/// box stays finite near the poles.
pub fn bounding_box(latitude: f64, longitude: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE_LAT;
    let lon_cos = latitude.to_radians().cos().max(MIN_LONGITUDE_COS);
    let lon_delta = radius_km / (KM_PER_DEGREE_LAT * lon_cos);

    BoundingBox {
        min_latitude: latitude - lat_delta,
        max_latitude: latitude + lat_delta,
        min_longitude: longitude - lon_delta,
        max_longitude: longitude + lon_delta,
    }
}

/// Whether a coordinate pair is within the valid latitude/longitude domain.
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= 90.0
        && longitude.abs() <= 180.0
}
