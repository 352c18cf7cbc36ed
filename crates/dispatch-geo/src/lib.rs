//! Geolocation for dispatch tickets and technicians.
//!
//! Three layers, leaves first: postal code normalization and free-text
//! extraction ([`postal`]), tiered coordinate resolution against static
//! reference tables plus an optional dynamic postal→region map
//! ([`resolver`]), and great-circle distance estimation with the
//! road-curvature penalty model ([`distance`]).

pub mod distance;
pub mod postal;
pub mod region_map;
pub mod resolver;
pub mod tables;

pub use distance::{effective_factor, format_eta, haversine_km};
pub use postal::PostalFormat;
pub use region_map::{load_postal_regions, RegionMapError};
pub use resolver::GeoResolver;
