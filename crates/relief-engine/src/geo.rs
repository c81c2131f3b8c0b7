//! Road-distance estimation between coordinate pairs.
//!
//! Uses the haversine great-circle distance (Earth radius 6371 km) scaled
//! by a flat road-inefficiency factor of 1.2 to approximate real road
//! travel, rounded to the nearest whole kilometer. This is deliberately
//! not a routing engine; at dispatch-planning granularity the flat factor
//! is close enough.

use relief_types::Coordinates;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Extra distance factor accounting for road-network inefficiency.
const ROAD_FACTOR: f64 = 1.2;

/// Assumed average transport speed for delivery estimates, in km/h.
const TRANSPORT_SPEED_KMH: f64 = 80.0;

/// Estimated road distance between two points, in whole kilometers.
///
/// Symmetric in its arguments; zero for identical points.
pub fn road_distance_km(a: Coordinates, b: Coordinates) -> u32 {
    let great_circle = haversine_km(a, b);
    saturate_to_u32((great_circle * ROAD_FACTOR).round())
}

/// Estimated delivery time for a road distance, in whole hours.
///
/// Assumes an average transport speed of 80 km/h and rounds up, so any
/// nonzero distance costs at least one hour.
pub fn delivery_hours(distance_km: u32) -> u32 {
    saturate_to_u32((f64::from(distance_km) / TRANSPORT_SPEED_KMH).ceil())
}

/// Great-circle distance between two points, in kilometers.
fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Convert a non-negative whole-valued float to `u32`, clamping at the
/// type bounds. Terrestrial distances never come near the clamp.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate_to_u32(value: f64) -> u32 {
    value.clamp(0.0, f64::from(u32::MAX)) as u32
}
