//! Wire types for the geocoding and matrix endpoints.

use serde::{Deserialize, Serialize};

/// GeoJSON-style geocode search response (only the fields we read).
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeFeature {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeGeometry {
    /// `[lng, lat]`, GeoJSON axis order.
    pub coordinates: [f64; 2],
}

/// Body of the one-origin-to-many-destinations matrix request.
#[derive(Debug, Serialize)]
pub(crate) struct MatrixRequest {
    /// `[lng, lat]` pairs; index 0 is the origin.
    pub locations: Vec<[f64; 2]>,
    pub sources: Vec<usize>,
    pub destinations: Vec<usize>,
    pub metrics: Vec<&'static str>,
    /// Distance unit, always `"km"`.
    pub units: &'static str,
}

/// Matrix response: one row per source, `null` where a pair is unroutable.
#[derive(Debug, Deserialize)]
pub(crate) struct MatrixResponse {
    pub distances: Option<Vec<Vec<Option<f64>>>>,
    /// Seconds.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

/// Driving distances/durations aligned index-for-index with the destination
/// postal codes the caller supplied. `None` marks a destination that could
/// not be geocoded or routed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingMatrix {
    /// Kilometers.
    pub distances_km: Vec<Option<f64>>,
    /// Minutes.
    pub durations_min: Vec<Option<f64>>,
}
