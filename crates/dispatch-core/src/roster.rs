//! Technician roster loading.
//!
//! The roster is an externally supplied ordered sequence of technician
//! records, loaded once per resolution request. Field-name normalization
//! happens here, at the boundary: exported rosters use inconsistent column
//! names (`zip`/`postal_code`, `province`/`state`, `town`) and the serde
//! aliases on [`Technician`] map them all onto the canonical fields.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::RosterError;
use crate::types::Technician;

#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub technicians: Vec<Technician>,
}

/// Load and validate the technician roster from a YAML file.
///
/// # Errors
///
/// Returns [`RosterError`] if the file cannot be read, parsed, or fails
/// validation (empty id/name, duplicate ids).
pub fn load_roster(path: &Path) -> Result<RosterFile, RosterError> {
    let content = std::fs::read_to_string(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let roster: RosterFile = serde_yaml::from_str(&content)?;
    validate_roster(&roster)?;

    Ok(roster)
}

fn validate_roster(roster: &RosterFile) -> Result<(), RosterError> {
    let mut seen_ids = HashSet::new();

    for tech in &roster.technicians {
        if tech.id.trim().is_empty() {
            return Err(RosterError::Validation(
                "technician id must be non-empty".to_string(),
            ));
        }

        if tech.name.trim().is_empty() {
            return Err(RosterError::Validation(format!(
                "technician '{}' has an empty name",
                tech.id
            )));
        }

        if !seen_ids.insert(tech.id.clone()) {
            return Err(RosterError::Validation(format!(
                "duplicate technician id: '{}'",
                tech.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<RosterFile, RosterError> {
        let roster: RosterFile = serde_yaml::from_str(yaml)?;
        validate_roster(&roster)?;
        Ok(roster)
    }

    #[test]
    fn parses_canonical_fields() {
        let roster = parse(
            r"
technicians:
  - id: T-1
    name: Jane Doe
    city: Ottawa
    region: ON
    postal: K1A 0B1
",
        )
        .unwrap();
        assert_eq!(roster.technicians.len(), 1);
        assert_eq!(roster.technicians[0].postal.as_deref(), Some("K1A 0B1"));
    }

    #[test]
    fn parses_aliased_fields() {
        let roster = parse(
            r"
technicians:
  - id: T-2
    name: Sam Park
    town: Halifax
    province: NS
    postal_code: B3H 4R2
",
        )
        .unwrap();
        let tech = &roster.technicians[0];
        assert_eq!(tech.city.as_deref(), Some("Halifax"));
        assert_eq!(tech.region.as_deref(), Some("NS"));
        assert_eq!(tech.postal.as_deref(), Some("B3H 4R2"));
    }

    #[test]
    fn missing_location_fields_default_to_none() {
        let roster = parse(
            r"
technicians:
  - id: T-3
    name: No Address
",
        )
        .unwrap();
        let tech = &roster.technicians[0];
        assert!(tech.city.is_none());
        assert!(tech.region.is_none());
        assert!(tech.postal.is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = parse(
            r"
technicians:
  - id: T-1
    name: First
  - id: T-1
    name: Second
",
        );
        assert!(
            matches!(result, Err(RosterError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate-id validation error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_empty_name() {
        let result = parse(
            r"
technicians:
  - id: T-1
    name: '  '
",
        );
        assert!(
            matches!(result, Err(RosterError::Validation(ref msg)) if msg.contains("empty name")),
            "expected empty-name validation error, got: {result:?}"
        );
    }

    #[test]
    fn roster_preserves_input_order() {
        let roster = parse(
            r"
technicians:
  - id: T-9
    name: Last Hired
  - id: T-1
    name: First Hired
",
        )
        .unwrap();
        let ids: Vec<&str> = roster.technicians.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T-9", "T-1"]);
    }
}
