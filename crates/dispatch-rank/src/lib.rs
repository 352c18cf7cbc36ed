//! Closest-technician ranking engine.
//!
//! Orchestrates the postal normalizer, geolocation resolver, distance
//! estimator, and routing gateway over a technician roster: a baseline
//! straight-line pass scores everyone, the nearest candidates get a
//! driving-accurate matrix pass, and a gateway failure degrades to the
//! penalty-adjusted estimate rather than failing the request.

mod engine;
mod error;
mod types;

pub use engine::find_closest;
pub use error::RankError;
pub use types::{RankConfig, Ranking, SHORTLIST_LEN};
