//! Geodesic math helpers for building lookups.
//!
//! Pure functions only; everything here is deterministic and unit-testable
//! without a database.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate kilometers per degree of latitude (and of longitude at the
/// equator). Used by the rectangular pre-filter in radius queries.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance between two points in kilometers, via the haversine
/// formula. Inputs are decimal degrees.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Inclusive bounding-box membership test, each axis independently.
///
/// Does not handle wraparound across the ±180° meridian; callers near the
/// antimeridian get no results rather than wrong ones.
pub fn in_bounding_box(
    lat: f64,
    lon: f64,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
) -> bool {
    lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
}
