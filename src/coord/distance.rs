//! Great-circle distance (haversine formula)

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::{check_latitude, check_longitude, numeric, Coordinates};
use crate::error::Result;

/// Calculate the distance between two points in kilometres
///
/// # Arguments
/// * `lat1`, `lon1` - First point, degrees
/// * `lat2`, `lon2` - Second point, degrees
///
/// # Errors
/// [`crate::Error::OutOfRange`] naming the first argument outside
/// [-90, 90] (latitudes) or [-180, 180] (longitudes).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    let p1 = Coordinates::new(
        check_latitude("latitude_1", lat1)?,
        check_longitude("longitude_1", lon1)?,
    );
    let p2 = Coordinates::new(
        check_latitude("latitude_2", lat2)?,
        check_longitude("longitude_2", lon2)?,
    );
    Ok(great_circle_km(p1, p2))
}

/// Same as [`haversine_km`] for loosely-typed JSON arguments
///
/// All four arguments are type checked before any range check.
pub fn haversine_km_json(
    lat1: &serde_json::Value,
    lon1: &serde_json::Value,
    lat2: &serde_json::Value,
    lon2: &serde_json::Value,
) -> Result<f64> {
    let lat1 = numeric("latitude_1", lat1)?;
    let lon1 = numeric("longitude_1", lon1)?;
    let lat2 = numeric("latitude_2", lat2)?;
    let lon2 = numeric("longitude_2", lon2)?;
    haversine_km(lat1, lon1, lat2, lon2)
}

/// Haversine distance for already-validated coordinates
///
/// Each term is built from a difference that is squared, or from a product
/// of cosines, so swapping `p1` and `p2` gives a bit-identical result.
pub fn great_circle_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lng = p2.lng.to_radians() - p1.lng.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    tracing::trace!(?p1, ?p2, c, "central angle");

    EARTH_RADIUS_KM * c
}
