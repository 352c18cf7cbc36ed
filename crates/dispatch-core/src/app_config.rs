use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// API credential for the routing/geocoding provider. When absent the
    /// engine runs in estimate-only mode.
    pub ors_api_key: Option<String>,
    pub log_level: String,
    pub roster_path: PathBuf,
    /// Optional dynamic postal→region map file. Unset means disabled.
    pub postal_region_path: Option<PathBuf>,
    pub http_timeout_secs: u64,
    /// Drive-time heuristic multiplier applied to straight-line distances.
    pub base_factor: f64,
    /// Assumed average speed for estimate-mode ETA, km/h.
    pub speed_kmh: f64,
    /// How many straight-line-nearest candidates get the driving-accurate pass.
    pub driving_candidates: usize,
    /// ISO country code restricting geocoding and selecting the postal format.
    pub country: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "ors_api_key",
                &self.ors_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("roster_path", &self.roster_path)
            .field("postal_region_path", &self.postal_region_path)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("base_factor", &self.base_factor)
            .field("speed_kmh", &self.speed_kmh)
            .field("driving_candidates", &self.driving_candidates)
            .field("country", &self.country)
            .finish()
    }
}
