use dispatch_core::{AppConfig, RankMode, ScoredCandidate};
use dispatch_geo::PostalFormat;
use serde::Serialize;

/// Shortlist length returned alongside the best candidate.
pub const SHORTLIST_LEN: usize = 8;

/// Tuning knobs for one resolution request.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Postal grammar and geocoding country for this deployment.
    pub format: PostalFormat,
    /// Drive-time heuristic multiplier; clamped to `[0.8, 5]` downstream.
    pub base_factor: f64,
    /// Assumed average speed for estimate-mode ETA; clamped to `[20, 130]`.
    pub speed_kmh: f64,
    /// How many straight-line-nearest candidates get the driving pass.
    pub driving_candidates: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            format: PostalFormat::CaAlphanumeric,
            base_factor: 1.25,
            speed_kmh: 80.0,
            driving_candidates: 25,
        }
    }
}

impl RankConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            format: PostalFormat::for_country(&config.country),
            base_factor: config.base_factor,
            speed_kmh: config.speed_kmh,
            driving_candidates: config.driving_candidates,
        }
    }
}

/// Result of one resolution: which distance model produced it, the best
/// candidate, and the shortlist in final rank order (best included at
/// index 0).
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub mode: RankMode,
    pub best: ScoredCandidate,
    pub shortlist: Vec<ScoredCandidate>,
}
