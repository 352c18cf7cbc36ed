//! `find_closest` orchestration.

use std::cmp::Ordering;

use dispatch_core::{Coordinate, RankMode, ScoredCandidate, Technician};
use dispatch_gateway::{DrivingMatrix, RoutingClient, MAX_MATRIX_DESTINATIONS};
use dispatch_geo::{distance, GeoResolver};

use crate::error::RankError;
use crate::types::{RankConfig, Ranking, SHORTLIST_LEN};

/// One roster entry that survived resolution, scored against the ticket.
struct Candidate<'a> {
    technician: &'a Technician,
    postal: String,
    coordinate: Coordinate,
    straight_km: f64,
    effective_km: f64,
}

/// Finds the closest technicians to a ticket location.
///
/// 1. Extract/normalize the ticket postal from free text or direct input.
/// 2. Resolve the ticket coordinate through the precision tiers.
/// 3. Resolve every roster entry; entries that resolve at no tier are
///    skipped, never scored.
/// 4. Score all resolved entries by straight-line distance — the baseline
///    ranking and the fallback final ranking.
/// 5. Send the top-K baseline candidates through the routing gateway and
///    re-rank them by driving duration (nulls last), driving distance as
///    the tiebreak.
/// 6. On any gateway failure, fall back to the baseline ranking with
///    penalty-adjusted effective distances; the failure is logged, not
///    surfaced.
/// 7. Report which mode produced the result, plus best and shortlist.
///
/// # Errors
///
/// - [`RankError::NoPostalFound`] when the input contains no valid postal.
/// - [`RankError::TicketUnresolved`] when the ticket postal resolves at no tier.
/// - [`RankError::EmptyRoster`] / [`RankError::NoCandidates`] when there is
///   nothing to rank.
pub async fn find_closest(
    ticket_input: &str,
    roster: &[Technician],
    config: &RankConfig,
    resolver: &GeoResolver,
    gateway: Option<&RoutingClient>,
) -> Result<Ranking, RankError> {
    let format = config.format;

    let ticket_postal = format
        .normalize(ticket_input)
        .or_else(|| format.extract(ticket_input))
        .ok_or(RankError::NoPostalFound)?;

    let ticket_coord = resolver.resolve(format, &ticket_postal, None, None);
    let Some(ticket_point) = ticket_coord.point() else {
        return Err(RankError::TicketUnresolved {
            postal: ticket_postal,
        });
    };
    let ticket_region = resolver.derive_region(format, &ticket_postal);

    if roster.is_empty() {
        return Err(RankError::EmptyRoster);
    }

    let mut candidates: Vec<Candidate<'_>> = Vec::with_capacity(roster.len());
    for technician in roster {
        let postal = technician
            .postal
            .as_deref()
            .and_then(|raw| format.normalize(raw))
            .unwrap_or_default();
        let coordinate = resolver.resolve(
            format,
            &postal,
            technician.city.as_deref(),
            technician.region.as_deref(),
        );
        let Some(point) = coordinate.point() else {
            tracing::debug!(
                technician = technician.id.as_str(),
                "skipping technician with unresolvable location"
            );
            continue;
        };

        let straight_km = distance::haversine_km(ticket_point, point);
        let factor = distance::effective_factor(
            config.base_factor,
            &ticket_coord,
            ticket_region.as_deref(),
            &coordinate,
        );
        candidates.push(Candidate {
            technician,
            postal,
            coordinate,
            straight_km,
            effective_km: straight_km * factor,
        });
    }

    if candidates.is_empty() {
        return Err(RankError::NoCandidates);
    }

    // Baseline ranking: straight-line ascending.
    candidates.sort_by(|a, b| a.straight_km.total_cmp(&b.straight_km));

    let k = config
        .driving_candidates
        .min(MAX_MATRIX_DESTINATIONS)
        .min(candidates.len());

    if let Some(client) = gateway {
        let subset = &candidates[..k];
        let destination_postals: Vec<String> =
            subset.iter().map(|c| c.postal.clone()).collect();
        match client
            .driving_matrix(&ticket_postal, &destination_postals, format.country_code())
            .await
        {
            Ok(matrix) => {
                tracing::info!(candidates = k, "ranked with driving matrix");
                return Ok(rank_driving(subset, &matrix, config));
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "routing gateway unavailable — falling back to straight-line estimate"
                );
            }
        }
    }

    tracing::info!(candidates = candidates.len(), "ranked with straight-line estimate");
    Ok(rank_estimate(&candidates, config))
}

/// Final ranking when the matrix call succeeded: duration ascending with
/// nulls last, driving distance as tiebreak, baseline distance as the
/// deterministic last resort.
fn rank_driving(subset: &[Candidate<'_>], matrix: &DrivingMatrix, config: &RankConfig) -> Ranking {
    let mut scored: Vec<ScoredCandidate> = subset
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let driving_km = matrix.distances_km[i];
            let driving_min = matrix.durations_min[i];
            let eta = match driving_min {
                Some(minutes) => distance::format_duration_min(minutes),
                None => distance::format_eta(candidate.effective_km, config.speed_kmh),
            };
            to_scored(candidate, driving_km, driving_min, eta)
        })
        .collect();

    scored.sort_by(|a, b| {
        cmp_nulls_last(a.driving_min, b.driving_min)
            .then_with(|| cmp_nulls_last(a.driving_km, b.driving_km))
            .then_with(|| a.straight_km.total_cmp(&b.straight_km))
    });

    finish(RankMode::Driving, scored)
}

/// Fallback ranking: the baseline straight-line order with effective
/// distances for display/ETA.
fn rank_estimate(candidates: &[Candidate<'_>], config: &RankConfig) -> Ranking {
    let scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| {
            let eta = distance::format_eta(candidate.effective_km, config.speed_kmh);
            to_scored(candidate, None, None, eta)
        })
        .collect();

    finish(RankMode::Estimate, scored)
}

fn to_scored(
    candidate: &Candidate<'_>,
    driving_km: Option<f64>,
    driving_min: Option<f64>,
    eta: String,
) -> ScoredCandidate {
    ScoredCandidate {
        technician: candidate.technician.clone(),
        straight_km: candidate.straight_km,
        effective_km: candidate.effective_km,
        driving_km,
        driving_min,
        eta,
        precision: candidate.coordinate.precision,
    }
}

fn finish(mode: RankMode, mut scored: Vec<ScoredCandidate>) -> Ranking {
    scored.truncate(SHORTLIST_LEN);
    // Candidates are non-empty by the time either rank path runs.
    let best = scored[0].clone();
    Ranking {
        mode,
        best,
        shortlist: scored,
    }
}

/// Ascending order with `None` treated as +∞.
fn cmp_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_sort_after_any_value() {
        assert_eq!(cmp_nulls_last(Some(1.0), None), Ordering::Less);
        assert_eq!(cmp_nulls_last(None, Some(1e9)), Ordering::Greater);
        assert_eq!(cmp_nulls_last(None, None), Ordering::Equal);
        assert_eq!(cmp_nulls_last(Some(2.0), Some(3.0)), Ordering::Less);
    }

    #[test]
    fn driving_sort_orders_duration_then_distance_then_straight() {
        let mk = |driving_min: Option<f64>, driving_km: Option<f64>, straight_km: f64| {
            ScoredCandidate {
                technician: Technician {
                    id: "T".to_string(),
                    name: "T".to_string(),
                    city: None,
                    region: None,
                    postal: None,
                },
                straight_km,
                effective_km: straight_km,
                driving_km,
                driving_min,
                eta: String::new(),
                precision: dispatch_core::Precision::Exact,
            }
        };

        let mut scored = vec![
            mk(None, None, 5.0),
            mk(Some(30.0), Some(40.0), 50.0),
            mk(None, None, 2.0),
            mk(Some(30.0), Some(35.0), 60.0),
            mk(Some(10.0), Some(90.0), 70.0),
        ];
        scored.sort_by(|a, b| {
            cmp_nulls_last(a.driving_min, b.driving_min)
                .then_with(|| cmp_nulls_last(a.driving_km, b.driving_km))
                .then_with(|| a.straight_km.total_cmp(&b.straight_km))
        });

        let key: Vec<(Option<f64>, f64)> =
            scored.iter().map(|s| (s.driving_min, s.straight_km)).collect();
        assert_eq!(
            key,
            vec![
                (Some(10.0), 70.0),
                (Some(30.0), 60.0), // 35 km beats 40 km at equal duration
                (Some(30.0), 50.0),
                (None, 2.0), // nulls last, straight-line as the final tiebreak
                (None, 5.0),
            ]
        );
    }
}
