use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let ors_api_key = lookup("DISPATCH_ORS_API_KEY").ok();
    let log_level = or_default("DISPATCH_LOG_LEVEL", "info");
    let roster_path = PathBuf::from(or_default(
        "DISPATCH_ROSTER_PATH",
        "./config/technicians.yaml",
    ));
    let postal_region_path = lookup("DISPATCH_POSTAL_REGION_PATH").ok().map(PathBuf::from);

    let http_timeout_secs = parse_u64("DISPATCH_HTTP_TIMEOUT_SECS", "30")?;
    let base_factor = parse_f64("DISPATCH_BASE_FACTOR", "1.25")?;
    let speed_kmh = parse_f64("DISPATCH_SPEED_KMH", "80")?;
    let driving_candidates = parse_usize("DISPATCH_DRIVING_CANDIDATES", "25")?;
    let country = or_default("DISPATCH_COUNTRY", "CA").to_uppercase();

    Ok(AppConfig {
        ors_api_key,
        log_level,
        roster_path,
        postal_region_path,
        http_timeout_secs,
        base_factor,
        speed_kmh,
        driving_candidates,
        country,
    })
}
