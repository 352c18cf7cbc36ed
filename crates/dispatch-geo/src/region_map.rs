//! Optional dynamic postal→region mapping.
//!
//! Operations can ship a YAML file refining the static prefix rule with
//! per-postal region assignments (border codes, reorganized sortation
//! areas). The file is optional: an unset path is the explicit disabled
//! state and resolution falls back to the prefix-derived region.

use std::collections::HashMap;
use std::path::Path;

use crate::postal::PostalFormat;

/// Errors raised while loading the postal→region map file.
#[derive(Debug, thiserror::Error)]
pub enum RegionMapError {
    #[error("failed to read postal-region file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse postal-region file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Loads the optional postal→region map.
///
/// `None` path means the mapping is disabled; that is not an error and
/// returns `Ok(None)`. Keys are normalized on load; entries whose key does
/// not parse as a postal code in `format` are dropped with a warning.
///
/// # Errors
///
/// Returns [`RegionMapError`] only when a configured file cannot be read
/// or parsed.
pub fn load_postal_regions(
    format: PostalFormat,
    path: Option<&Path>,
) -> Result<Option<HashMap<String, String>>, RegionMapError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(path).map_err(|e| RegionMapError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let raw: HashMap<String, String> = serde_yaml::from_str(&content)?;

    let mut map = HashMap::with_capacity(raw.len());
    for (key, region) in raw {
        match format.normalize(&key) {
            Some(postal) => {
                map.insert(postal, region.trim().to_uppercase());
            }
            None => {
                tracing::warn!(key = %key, "dropping unparseable postal-region entry");
            }
        }
    }

    tracing::info!(entries = map.len(), "loaded postal-region map");
    Ok(Some(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "dispatch-region-map-{}-{}.yaml",
            std::process::id(),
            content.len()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn unset_path_is_disabled_not_an_error() {
        let result = load_postal_regions(PostalFormat::CaAlphanumeric, None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn loads_and_normalizes_entries() {
        let path = write_temp("k1a 0b1: on\nm5v 3l9: Qc\n");
        let map = load_postal_regions(PostalFormat::CaAlphanumeric, Some(&path))
            .unwrap()
            .unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(map.get("K1A0B1").map(String::as_str), Some("ON"));
        assert_eq!(map.get("M5V3L9").map(String::as_str), Some("QC"));
    }

    #[test]
    fn drops_unparseable_keys() {
        let path = write_temp("not-a-postal: ON\nk1a 0b1: ON\n");
        let map = load_postal_regions(PostalFormat::CaAlphanumeric, Some(&path))
            .unwrap()
            .unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("K1A0B1"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_postal_regions(
            PostalFormat::CaAlphanumeric,
            Some(Path::new("/nonexistent/map.yaml")),
        );
        assert!(matches!(result, Err(RegionMapError::Io { .. })));
    }
}
