//! Command line interface for closest-technician resolution.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dispatch_core::{RankMode, ScoredCandidate};
use dispatch_gateway::{GeocodeCache, RoutingClient};
use dispatch_geo::{load_postal_regions, GeoResolver, PostalFormat};
use dispatch_rank::{find_closest, RankConfig};

#[derive(Debug, Parser)]
#[command(name = "dispatch-cli")]
#[command(about = "Field-service dispatch: closest-technician resolution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank technicians by travel distance to a ticket location.
    Find {
        /// Ticket free text or a bare postal code.
        ticket: String,
        /// Roster file path, overriding DISPATCH_ROSTER_PATH.
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Drive-time heuristic multiplier, overriding DISPATCH_BASE_FACTOR.
        #[arg(long)]
        base_factor: Option<f64>,
        /// Assumed average speed (km/h), overriding DISPATCH_SPEED_KMH.
        #[arg(long)]
        speed: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dispatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Find {
            ticket,
            roster,
            base_factor,
            speed,
        } => {
            let format = PostalFormat::for_country(&config.country);

            let roster_path = roster.unwrap_or_else(|| config.roster_path.clone());
            let roster = dispatch_core::load_roster(&roster_path)?;

            let postal_regions =
                load_postal_regions(format, config.postal_region_path.as_deref())?;
            let resolver = match postal_regions {
                Some(map) => GeoResolver::with_postal_regions(map),
                None => GeoResolver::new(),
            };

            let cache = Arc::new(GeocodeCache::new());
            let gateway = match &config.ors_api_key {
                Some(key) => Some(RoutingClient::new(key, config.http_timeout_secs, cache)?),
                None => {
                    tracing::info!("no routing API key configured — estimate mode only");
                    None
                }
            };

            let mut rank_config = RankConfig::from_app_config(&config);
            if let Some(factor) = base_factor {
                rank_config.base_factor = factor;
            }
            if let Some(speed) = speed {
                rank_config.speed_kmh = speed;
            }

            let ranking = find_closest(
                &ticket,
                &roster.technicians,
                &rank_config,
                &resolver,
                gateway.as_ref(),
            )
            .await?;

            println!("mode: {}", ranking.mode);
            println!("best: {}", describe(&ranking.best, ranking.mode, format));
            println!("shortlist:");
            for (rank, candidate) in ranking.shortlist.iter().enumerate() {
                println!("  {}. {}", rank + 1, describe(candidate, ranking.mode, format));
            }
        }
    }

    Ok(())
}

fn describe(candidate: &ScoredCandidate, mode: RankMode, format: PostalFormat) -> String {
    let tech = &candidate.technician;
    let postal = tech
        .postal
        .as_deref()
        .and_then(|raw| format.normalize(raw))
        .map(|normalized| format.format_display(&normalized))
        .unwrap_or_else(|| "no postal".to_string());

    let distance = match (mode, candidate.driving_km) {
        (RankMode::Driving, Some(km)) => format!("{km:.1} km driving"),
        _ => format!("{:.1} km est. road", candidate.effective_km),
    };

    format!(
        "{} ({}) — {} — {:.1} km straight-line, {}, ETA {} [{}]",
        tech.name, tech.id, postal, candidate.straight_km, distance, candidate.eta,
        candidate.precision
    )
}
