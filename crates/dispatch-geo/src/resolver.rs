//! Tiered coordinate resolution.
//!
//! Maps a normalized postal code (plus optional city/region hints) to a
//! [`Coordinate`], trying decreasing precision tiers until one hits:
//!
//! 1. curated postal override → `exact`
//! 2. (city, region) centroid → `city`
//! 3. regional centroid, region from the dynamic map or the prefix rule → `region`
//! 4. nothing → `unresolved` (caller must exclude the entity from scoring)

use std::collections::HashMap;

use dispatch_core::{Coordinate, Precision};

use crate::postal::PostalFormat;
use crate::tables;

/// Dependency-injected lookup service over the static reference tables and
/// an optional dynamic postal→region map.
///
/// Constructed once per process; immutable after load, so it is freely
/// shareable across concurrent resolution requests.
#[derive(Debug, Default)]
pub struct GeoResolver {
    postal_regions: Option<HashMap<String, String>>,
}

impl GeoResolver {
    /// Resolver backed by the static tables only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            postal_regions: None,
        }
    }

    /// Resolver with a dynamic postal→region map layered over the static
    /// prefix rule. Map keys must be normalized postal codes.
    #[must_use]
    pub fn with_postal_regions(postal_regions: HashMap<String, String>) -> Self {
        Self {
            postal_regions: Some(postal_regions),
        }
    }

    /// Resolves a coordinate for `postal` at the best available precision.
    ///
    /// `postal` must already be normalized (or empty when the entity has no
    /// usable postal code, in which case only the city tier can hit).
    #[must_use]
    pub fn resolve(
        &self,
        format: PostalFormat,
        postal: &str,
        city_hint: Option<&str>,
        region_hint: Option<&str>,
    ) -> Coordinate {
        // Tier 1: exact override.
        if let Some(point) = tables::postal_override(postal) {
            return Coordinate::new(point, Precision::Exact);
        }

        let region = self.resolve_region(format, postal, region_hint);

        // Tier 2: (city, region) centroid — needs both.
        if let (Some(city), Some(region)) = (city_hint, region.as_deref()) {
            let city_upper = city.trim().to_uppercase();
            if let Some(point) = tables::city_centroid(&city_upper, region) {
                return Coordinate::new(point, Precision::City);
            }
        }

        // Tier 3: regional centroid.
        if let Some(point) = region.as_deref().and_then(tables::region_centroid) {
            return Coordinate::new(point, Precision::Region);
        }

        tracing::debug!(postal, "no resolution tier hit");
        Coordinate::unresolved()
    }

    /// Derives the region code for a normalized postal code: the dynamic
    /// map wins when it has an entry, else the static prefix rule applies.
    #[must_use]
    pub fn derive_region(&self, format: PostalFormat, postal: &str) -> Option<String> {
        if postal.is_empty() {
            return None;
        }
        if let Some(map) = &self.postal_regions {
            if let Some(region) = map.get(postal) {
                return Some(region.clone());
            }
        }
        tables::region_from_postal(format, postal).map(str::to_string)
    }

    /// Region used by the resolution tiers: an explicit hint wins over
    /// derivation from the postal prefix.
    fn resolve_region(
        &self,
        format: PostalFormat,
        postal: &str,
        region_hint: Option<&str>,
    ) -> Option<String> {
        region_hint
            .and_then(tables::canonical_region)
            .or_else(|| self.derive_region(format, postal))
    }
}
