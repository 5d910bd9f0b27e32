//! Walk distance utilities
//!
//! Pure functions for the distance and rotation figures reported when a
//! measurement ends.

use libm::{atan2, cos, round, sin, sqrt};

use super::state::Coordinate;

/// Mean Earth radius used for great-circle distance
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two GPS positions using Haversine formula
///
/// # Arguments
///
/// * `start`, `end` - Positions in degrees
///
/// # Returns
///
/// Distance in meters
pub fn haversine_distance(start: &Coordinate, end: &Coordinate) -> f64 {
    const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

    let lat1_rad = start.latitude * DEG_TO_RAD;
    let lat2_rad = end.latitude * DEG_TO_RAD;
    let delta_lat = (end.latitude - start.latitude) * DEG_TO_RAD;
    let delta_lon = (end.longitude - start.longitude) * DEG_TO_RAD;

    let sin_dlat = sin(delta_lat / 2.0);
    let sin_dlon = sin(delta_lon / 2.0);
    let a = sin_dlat * sin_dlat + cos(lat1_rad) * cos(lat2_rad) * sin_dlon * sin_dlon;
    let c = 2.0 * atan2(sqrt(a), sqrt(1.0 - a));

    EARTH_RADIUS_M * c
}

/// Round to two decimal places, the precision shown to the walker
pub fn round_centi(value: f64) -> f64 {
    round(value * 100.0) / 100.0
}

/// Offset a coordinate by a distance along a compass bearing
///
/// Flat-earth approximation, accurate for walking distances.
///
/// # Arguments
///
/// * `origin` - Start position in degrees
/// * `distance_m` - Distance to travel in meters
/// * `bearing_deg` - Bearing in degrees (0 = north, 90 = east)
pub fn offset_by(origin: &Coordinate, distance_m: f64, bearing_deg: f64) -> Coordinate {
    const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

    let bearing = bearing_deg.to_radians();
    let north_m = distance_m * cos(bearing);
    let east_m = distance_m * sin(bearing);

    let dlat = north_m / EARTH_RADIUS_M * RAD_TO_DEG;
    let dlon = east_m / (EARTH_RADIUS_M * cos(origin.latitude.to_radians())) * RAD_TO_DEG;

    Coordinate::new(origin.latitude + dlat, origin.longitude + dlon)
}
