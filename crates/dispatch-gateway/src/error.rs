use thiserror::Error;

/// Errors returned by the routing gateway client.
///
/// Every variant is recoverable from the ranking engine's point of view: a
/// gateway failure triggers the straight-line fallback rather than failing
/// the resolution request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network, TLS, or non-2xx HTTP failure from the underlying client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The matrix response parsed but did not have the promised shape.
    #[error("malformed matrix response: {0}")]
    MalformedResponse(String),

    /// A configured base URL is not a valid URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The origin postal code could not be geocoded; the batch is aborted.
    #[error("could not geocode origin postal code {postal}")]
    OriginNotGeocoded { postal: String },

    /// Every destination failed geocoding; there is nothing to route.
    #[error("none of the {count} destination postal codes could be geocoded")]
    NoDestinationsGeocoded { count: usize },

    /// The caller exceeded the matrix destination cap.
    #[error("too many matrix destinations: {count} exceeds {max}")]
    TooManyDestinations { count: usize, max: usize },
}
