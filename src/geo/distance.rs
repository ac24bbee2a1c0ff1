//! Great-circle distance

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::geo::Coordinates;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// No range validation is done: out-of-range degrees give a defined but
/// meaningless result.
pub fn haversine_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
