use serde::{Deserialize, Serialize};

/// A raw latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Confidence tier of a resolved coordinate.
///
/// Ordered from most to least precise. The tier drives the downstream
/// road-curvature penalty and must travel with the coordinate it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Known coordinate override or geocoded point.
    Exact,
    /// City-centroid lookup.
    City,
    /// Provincial/state centroid.
    Region,
    /// No coordinate could be produced at any tier.
    Unresolved,
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Exact => write!(f, "exact"),
            Precision::City => write!(f, "city"),
            Precision::Region => write!(f, "region"),
            Precision::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// A coordinate tagged with the precision tier that produced it.
///
/// `lat`/`lng` are meaningless when `precision` is [`Precision::Unresolved`];
/// use [`Coordinate::point`] to get the pair only when it is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
    pub precision: Precision,
}

impl Coordinate {
    #[must_use]
    pub fn new(point: GeoPoint, precision: Precision) -> Self {
        Self {
            lat: point.lat,
            lng: point.lng,
            precision,
        }
    }

    /// A coordinate that failed to resolve at every tier.
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            precision: Precision::Unresolved,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.precision != Precision::Unresolved
    }

    /// Returns the lat/lng pair, or `None` when unresolved.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        if self.is_resolved() {
            Some(GeoPoint {
                lat: self.lat,
                lng: self.lng,
            })
        } else {
            None
        }
    }
}

/// A field technician as loaded from the roster file.
///
/// The serde aliases absorb the column-name variants seen in exported
/// rosters so everything downstream operates on these canonical fields only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "town")]
    pub city: Option<String>,
    #[serde(default, alias = "province", alias = "state")]
    pub region: Option<String>,
    #[serde(default, alias = "zip", alias = "postal_code", alias = "postalcode")]
    pub postal: Option<String>,
}

/// A technician scored against one ticket location.
///
/// Transient: built per resolution request, ordered by the ranking engine,
/// discarded after the response.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub technician: Technician,
    /// Great-circle distance in kilometers.
    pub straight_km: f64,
    /// Straight-line distance scaled by the road-curvature penalty factor.
    pub effective_km: f64,
    /// Road distance in kilometers, when the routing gateway produced one.
    pub driving_km: Option<f64>,
    /// Road travel time in minutes, when the routing gateway produced one.
    pub driving_min: Option<f64>,
    /// Human-readable travel time, e.g. `"1h 5m"` or `"45 min"`.
    pub eta: String,
    /// Precision tier of the technician's resolved coordinate.
    pub precision: Precision,
}

/// Which distance model produced a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    /// Driving distance/time from the routing matrix.
    Driving,
    /// Straight-line distance with the heuristic penalty factor.
    Estimate,
}

impl std::fmt::Display for RankMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankMode::Driving => write!(f, "driving"),
            RankMode::Estimate => write!(f, "estimate"),
        }
    }
}
