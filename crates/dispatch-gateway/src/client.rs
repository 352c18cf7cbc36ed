//! HTTP client for the geocoding and driving-matrix endpoints.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::{Client, Url};

use dispatch_core::GeoPoint;

use crate::cache::GeocodeCache;
use crate::error::GatewayError;
use crate::types::{DrivingMatrix, GeocodeResponse, MatrixRequest, MatrixResponse};

const DEFAULT_GEOCODE_URL: &str = "https://api.openrouteservice.org/geocode/search";
const DEFAULT_MATRIX_URL: &str = "https://api.openrouteservice.org/v2/matrix/driving-car";

/// Hard cap on destinations per matrix call, bounding external call cost
/// and latency per resolution.
pub const MAX_MATRIX_DESTINATIONS: usize = 40;

/// Destination geocode lookups in flight at once within one matrix call.
const GEOCODE_CONCURRENCY: usize = 8;

/// Client for the routing provider's geocode and matrix endpoints.
///
/// Manages the HTTP client, API key, and endpoint URLs, and shares a
/// [`GeocodeCache`] across requests. Use [`RoutingClient::new`] for
/// production or [`RoutingClient::with_base_urls`] to point at a mock
/// server in tests.
pub struct RoutingClient {
    client: Client,
    api_key: String,
    geocode_url: Url,
    matrix_url: Url,
    cache: Arc<GeocodeCache>,
}

impl RoutingClient {
    /// Creates a new client pointed at the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        cache: Arc<GeocodeCache>,
    ) -> Result<Self, GatewayError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            cache,
            DEFAULT_GEOCODE_URL,
            DEFAULT_MATRIX_URL,
        )
    }

    /// Creates a new client with custom endpoint URLs (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GatewayError::InvalidBaseUrl`] if either
    /// URL does not parse.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: u64,
        cache: Arc<GeocodeCache>,
        geocode_url: &str,
        matrix_url: &str,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("dispatch/0.1 (closest-technician)")
            .build()?;

        let parse = |raw: &str| -> Result<Url, GatewayError> {
            Url::parse(raw).map_err(|e| GatewayError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            geocode_url: parse(geocode_url)?,
            matrix_url: parse(matrix_url)?,
            cache,
        })
    }

    /// Geocodes a normalized postal code, restricted to `country`.
    ///
    /// `Ok(None)` means the provider had no match (or the postal is empty);
    /// that is a data condition, not an error. Results — including misses —
    /// are cached for the process lifetime.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Http`] on network failure or non-2xx status.
    /// - [`GatewayError::Deserialize`] if the body is not the expected shape.
    pub async fn geocode_postal(
        &self,
        postal: &str,
        country: &str,
    ) -> Result<Option<GeoPoint>, GatewayError> {
        if postal.is_empty() {
            return Ok(None);
        }
        if let Some(cached) = self.cache.get(postal) {
            tracing::debug!(postal, "geocode cache hit");
            return Ok(cached);
        }

        let mut url = self.geocode_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            pairs.append_pair("text", postal);
            pairs.append_pair("boundary.country", country);
            pairs.append_pair("size", "1");
        }

        let body = self.request_json(&url).await?;
        let parsed: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| GatewayError::Deserialize {
                context: format!("geocode({postal})"),
                source: e,
            })?;

        let point = parsed.features.first().map(|feature| GeoPoint {
            lat: feature.geometry.coordinates[1],
            lng: feature.geometry.coordinates[0],
        });

        self.cache.insert(postal, point);
        Ok(point)
    }

    /// Runs one batched driving matrix call: geocode the origin and every
    /// destination postal, then request road distance/duration from the
    /// single origin to all routable destinations.
    ///
    /// The returned arrays are aligned index-for-index with
    /// `destination_postals`; a destination that fails to geocode keeps its
    /// position with `None` in both arrays and never aborts the batch.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::TooManyDestinations`] above [`MAX_MATRIX_DESTINATIONS`].
    /// - [`GatewayError::OriginNotGeocoded`] when the origin has no match.
    /// - [`GatewayError::NoDestinationsGeocoded`] when every destination failed.
    /// - [`GatewayError::Http`] / [`GatewayError::Deserialize`] /
    ///   [`GatewayError::MalformedResponse`] from the matrix request itself.
    pub async fn driving_matrix(
        &self,
        origin_postal: &str,
        destination_postals: &[String],
        country: &str,
    ) -> Result<DrivingMatrix, GatewayError> {
        let count = destination_postals.len();
        if count > MAX_MATRIX_DESTINATIONS {
            return Err(GatewayError::TooManyDestinations {
                count,
                max: MAX_MATRIX_DESTINATIONS,
            });
        }

        let origin = self
            .geocode_postal(origin_postal, country)
            .await?
            .ok_or_else(|| GatewayError::OriginNotGeocoded {
                postal: origin_postal.to_string(),
            })?;

        // Geocode destinations concurrently; merge back by original index.
        // A failed lookup leaves a gap at its position instead of aborting.
        let geocoded: Vec<(usize, Option<GeoPoint>)> =
            stream::iter(destination_postals.iter().enumerate())
                .map(|(index, postal)| async move {
                    match self.geocode_postal(postal, country).await {
                        Ok(point) => (index, point),
                        Err(error) => {
                            tracing::warn!(
                                postal = postal.as_str(),
                                error = %error,
                                "destination geocode failed; leaving gap"
                            );
                            (index, None)
                        }
                    }
                })
                .buffer_unordered(GEOCODE_CONCURRENCY)
                .collect()
                .await;

        let mut destination_points: Vec<Option<GeoPoint>> = vec![None; count];
        for (index, point) in geocoded {
            destination_points[index] = point;
        }

        let routed: Vec<usize> = (0..count)
            .filter(|&i| destination_points[i].is_some())
            .collect();
        if routed.is_empty() {
            return Err(GatewayError::NoDestinationsGeocoded { count });
        }

        let mut locations = Vec::with_capacity(routed.len() + 1);
        locations.push([origin.lng, origin.lat]);
        for &i in &routed {
            if let Some(point) = destination_points[i] {
                locations.push([point.lng, point.lat]);
            }
        }

        let request = MatrixRequest {
            locations,
            sources: vec![0],
            destinations: (1..=routed.len()).collect(),
            metrics: vec!["distance", "duration"],
            units: "km",
        };

        let response = self
            .client
            .post(self.matrix_url.clone())
            .header("Authorization", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: MatrixResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
                context: "matrix".to_string(),
                source: e,
            })?;

        let distances = first_row(parsed.distances, "distances", routed.len())?;
        let durations = first_row(parsed.durations, "durations", routed.len())?;

        tracing::debug!(
            origin = origin_postal,
            requested = count,
            routed = routed.len(),
            "matrix call complete"
        );

        Ok(align_matrix(count, &routed, distances, durations))
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GatewayError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        // Context is the path only: the full URL carries the API key.
        serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

/// Pulls the single source row out of a matrix metric and checks its width.
fn first_row(
    metric: Option<Vec<Vec<Option<f64>>>>,
    name: &str,
    expected_len: usize,
) -> Result<Vec<Option<f64>>, GatewayError> {
    let row = metric
        .and_then(|rows| rows.into_iter().next())
        .ok_or_else(|| GatewayError::MalformedResponse(format!("missing {name} array")))?;
    if row.len() != expected_len {
        return Err(GatewayError::MalformedResponse(format!(
            "{name} row has {} entries, expected {expected_len}",
            row.len()
        )));
    }
    Ok(row)
}

/// Spreads the compacted matrix row back across the original destination
/// positions; un-geocoded destinations stay `None`. Durations arrive in
/// seconds and leave in minutes.
fn align_matrix(
    len: usize,
    routed: &[usize],
    distances: Vec<Option<f64>>,
    durations: Vec<Option<f64>>,
) -> DrivingMatrix {
    let mut distances_km = vec![None; len];
    let mut durations_min = vec![None; len];
    for (column, &original) in routed.iter().enumerate() {
        distances_km[original] = distances[column];
        durations_min[original] = durations[column].map(|seconds| seconds / 60.0);
    }
    DrivingMatrix {
        distances_km,
        durations_min,
    }
}
