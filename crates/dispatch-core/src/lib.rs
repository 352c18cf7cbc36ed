//! Shared domain types and configuration for the dispatch workspace.
//!
//! Holds the canonical records every other crate operates on (technicians,
//! coordinates with precision tiers, scored candidates), the roster file
//! loader, and the environment-backed application configuration.

mod app_config;
mod config;
mod error;
mod roster;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, RosterError};
pub use roster::{load_roster, RosterFile};
pub use types::{Coordinate, GeoPoint, Precision, RankMode, ScoredCandidate, Technician};
