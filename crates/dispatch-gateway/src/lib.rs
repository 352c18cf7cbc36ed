//! HTTP client for the routing/geocoding provider.
//!
//! Wraps `reqwest` with typed error handling and a process-lifetime geocode
//! cache. One resolution issues at most one geocode call per uncached
//! postal code plus a single batched driving-distance matrix request; any
//! transport or API failure surfaces as a typed [`GatewayError`] so the
//! ranking engine can fall back to the straight-line estimate.

mod cache;
mod client;
mod error;
mod types;

pub use cache::GeocodeCache;
pub use client::{RoutingClient, MAX_MATRIX_DESTINATIONS};
pub use error::GatewayError;
pub use types::DrivingMatrix;
