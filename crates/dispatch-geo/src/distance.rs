//! Straight-line distance and the road-curvature penalty model.
//!
//! Centroid-based coordinates understate real driving distance more severely
//! than exact points, and two coarse endpoints compound the error
//! multiplicatively; [`effective_factor`] encodes that as a bounded scaling
//! of the operator-supplied base factor.

use dispatch_core::{Coordinate, GeoPoint, Precision};

use crate::tables;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Operator-supplied base factor bounds.
pub const MIN_BASE_FACTOR: f64 = 0.8;
pub const MAX_BASE_FACTOR: f64 = 5.0;

/// Final effective-factor bounds.
pub const MIN_EFFECTIVE_FACTOR: f64 = 1.0;
pub const MAX_EFFECTIVE_FACTOR: f64 = 12.0;

/// Extra multiplier when the technician side is only region-precise.
const REGION_TECH_PENALTY: f64 = 1.8;

/// Assumed-average-speed bounds for ETA rendering, km/h.
pub const MIN_SPEED_KMH: f64 = 20.0;
pub const MAX_SPEED_KMH: f64 = 130.0;

/// Great-circle distance between two points in kilometers (haversine).
///
/// Inputs in decimal degrees. Symmetric, zero for identical points, never
/// negative.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Penalty factor applied to a straight-line distance to approximate road
/// distance given the precision of both endpoints.
///
/// Starts from `base` clamped to `[0.8, 5]`. A region-precise ticket
/// multiplies in that region's road-curvature factor (`ticket_region` keys
/// the table; unlisted regions use the 6.0 default); a region-precise
/// technician multiplies in a further flat 1.8. The result is clamped to
/// `[1, 12]`.
#[must_use]
pub fn effective_factor(
    base: f64,
    ticket: &Coordinate,
    ticket_region: Option<&str>,
    tech: &Coordinate,
) -> f64 {
    let mut factor = base.clamp(MIN_BASE_FACTOR, MAX_BASE_FACTOR);

    if ticket.precision == Precision::Region {
        factor *= tables::road_factor(ticket_region);
    }
    if tech.precision == Precision::Region {
        factor *= REGION_TECH_PENALTY;
    }

    factor.clamp(MIN_EFFECTIVE_FACTOR, MAX_EFFECTIVE_FACTOR)
}

/// Renders a travel time for `km` at `speed_kmh` (clamped to `[20, 130]`).
#[must_use]
pub fn format_eta(km: f64, speed_kmh: f64) -> String {
    let speed = speed_kmh.clamp(MIN_SPEED_KMH, MAX_SPEED_KMH);
    format_duration_min(km / speed * 60.0)
}

/// Renders a duration in minutes as `"{h}h {m}m"` when at least an hour,
/// else `"{m} min"`, rounding to the nearest minute.
#[must_use]
pub fn format_duration_min(minutes: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = minutes.max(0.0).round() as u64;
    if total >= 60 {
        format!("{}h {}m", total / 60, total % 60)
    } else {
        format!("{total} min")
    }
}
