use std::f64::consts::PI;

use super::point::LatLng;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in kilometers
pub const EARTH_R: f64 = 6371.0;

/// Starting best distance for the nearest cluster search, in kilometers.
///
/// Larger than any great-circle distance on Earth, so the first cluster
/// with a center always becomes a candidate.
pub const MAX_DISTANCE_KM: f64 = 40000.0;

/// Calculates great-circle distance between two points with the haversine formula
///
/// A missing point yields zero, so an uninitialized cluster center never
/// poisons a comparison.
///
/// # Returns
///
/// Distance in kilometers
pub fn haversine_distance(p1: Option<&LatLng>, p2: Option<&LatLng>) -> f64 {
    let (Some(p1), Some(p2)) = (p1, p2) else {
        return 0.0;
    };

    let d_lat = (p2.lat - p1.lat) * DEGREE_RAD;
    let d_lng = (p2.lng - p1.lng) * DEGREE_RAD;

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (p1.lat * DEGREE_RAD).cos()
            * (p2.lat * DEGREE_RAD).cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_R * c
}
