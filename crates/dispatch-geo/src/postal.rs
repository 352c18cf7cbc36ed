//! Postal code normalization, validation, and free-text extraction.
//!
//! Each jurisdiction's grammar is a [`PostalFormat`] variant selected by
//! caller context. Canonical tokens are uppercase with no separators
//! (`K1A0B1`, `90210`); [`PostalFormat::format_display`] renders them back
//! into the human-readable spaced form.

use std::sync::OnceLock;

use regex::Regex;

/// Letters that never appear in a Canadian postal code (too easily confused
/// with digits in handwriting, per Canada Post).
const CA_FORBIDDEN_LETTERS: &[char] = &['D', 'F', 'I', 'O', 'Q', 'U'];

/// Additional letters excluded from the leading (forward sortation) position.
const CA_FORBIDDEN_FIRST: &[char] = &['W', 'Z'];

fn ca_candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b[A-Z][0-9][A-Z][ \-]?[0-9][A-Z][0-9]\b")
            .expect("static regex must compile")
    })
}

fn us_candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[0-9]{5}(?:-[0-9]{4})?\b").expect("static regex must compile"))
}

/// Jurisdiction-specific postal code grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostalFormat {
    /// Canadian 6-character alternating letter/digit code (`A9A 9A9`).
    CaAlphanumeric,
    /// US 5-digit zip; ZIP+4 input is accepted and truncated to the prefix.
    UsZip,
}

impl PostalFormat {
    /// Selects the format for an ISO country code. Defaults to Canadian
    /// for anything unrecognized, matching the service's home market.
    #[must_use]
    pub fn for_country(country: &str) -> Self {
        match country.to_uppercase().as_str() {
            "US" | "USA" => PostalFormat::UsZip,
            _ => PostalFormat::CaAlphanumeric,
        }
    }

    /// ISO country code used to restrict geocoding lookups.
    #[must_use]
    pub fn country_code(self) -> &'static str {
        match self {
            PostalFormat::CaAlphanumeric => "CA",
            PostalFormat::UsZip => "US",
        }
    }

    /// Picks the first format whose grammar accepts `raw`, if any.
    #[must_use]
    pub fn detect(raw: &str) -> Option<Self> {
        [PostalFormat::CaAlphanumeric, PostalFormat::UsZip]
            .into_iter()
            .find(|format| format.normalize(raw).is_some())
    }

    /// Canonicalizes `raw` into the fixed-length uppercase token, or `None`
    /// if it does not match this jurisdiction's grammar. Never panics on
    /// malformed input.
    #[must_use]
    pub fn normalize(self, raw: &str) -> Option<String> {
        let compact: String = raw
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match self {
            PostalFormat::CaAlphanumeric => normalize_ca(&compact),
            PostalFormat::UsZip => normalize_us(&compact),
        }
    }

    /// Scans free text for the first substring matching this grammar and
    /// returns its normalized form.
    #[must_use]
    pub fn extract(self, text: &str) -> Option<String> {
        let regex = match self {
            PostalFormat::CaAlphanumeric => ca_candidate_regex(),
            PostalFormat::UsZip => us_candidate_regex(),
        };
        // The regex is a coarse pre-filter; the grammar check in normalize
        // rejects candidates with forbidden letters.
        regex
            .find_iter(text)
            .find_map(|m| self.normalize(m.as_str()))
    }

    /// Renders a normalized token into the jurisdiction's display form,
    /// e.g. `K1A0B1` → `"K1A 0B1"`. Tokens that are not in canonical form
    /// are passed through unchanged.
    #[must_use]
    pub fn format_display(self, normalized: &str) -> String {
        match self {
            PostalFormat::CaAlphanumeric if normalized.len() == 6 => {
                format!("{} {}", &normalized[..3], &normalized[3..])
            }
            _ => normalized.to_string(),
        }
    }
}

fn normalize_ca(compact: &str) -> Option<String> {
    if compact.len() != 6 {
        return None;
    }
    for (i, c) in compact.chars().enumerate() {
        let valid = if i % 2 == 0 {
            c.is_ascii_uppercase()
                && !CA_FORBIDDEN_LETTERS.contains(&c)
                && (i != 0 || !CA_FORBIDDEN_FIRST.contains(&c))
        } else {
            c.is_ascii_digit()
        };
        if !valid {
            return None;
        }
    }
    Some(compact.to_string())
}

fn normalize_us(compact: &str) -> Option<String> {
    // Accept ZIP+4 (9 digits once the hyphen is stripped); keep the 5-digit prefix.
    if !compact.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match compact.len() {
        5 => Some(compact.to_string()),
        9 => Some(compact[..5].to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ca_accepts_spaced_lowercase() {
        let format = PostalFormat::CaAlphanumeric;
        assert_eq!(format.normalize("k1a 0b1").as_deref(), Some("K1A0B1"));
        assert_eq!(format.normalize("K1A-0B1").as_deref(), Some("K1A0B1"));
        assert_eq!(format.normalize("  m5v3l9 ").as_deref(), Some("M5V3L9"));
    }

    #[test]
    fn normalize_ca_rejects_malformed() {
        let format = PostalFormat::CaAlphanumeric;
        assert_eq!(format.normalize(""), None);
        assert_eq!(format.normalize("K1A0B"), None);
        assert_eq!(format.normalize("K1A0B12"), None);
        assert_eq!(format.normalize("11A0B1"), None);
        assert_eq!(format.normalize("KAA0B1"), None);
    }

    #[test]
    fn normalize_ca_rejects_forbidden_letters() {
        let format = PostalFormat::CaAlphanumeric;
        // D never appears in a Canadian postal code.
        assert_eq!(format.normalize("D1A0B1"), None);
        assert_eq!(format.normalize("K1D0B1"), None);
        // W is only forbidden in first position.
        assert_eq!(format.normalize("W1A0B1"), None);
        assert_eq!(format.normalize("K1W0B1").as_deref(), Some("K1W0B1"));
    }

    #[test]
    fn normalize_us_accepts_zip_and_zip4() {
        let format = PostalFormat::UsZip;
        assert_eq!(format.normalize("90210").as_deref(), Some("90210"));
        assert_eq!(format.normalize("90210-1234").as_deref(), Some("90210"));
    }

    #[test]
    fn normalize_us_rejects_malformed() {
        let format = PostalFormat::UsZip;
        assert_eq!(format.normalize("9021"), None);
        assert_eq!(format.normalize("902101"), None);
        assert_eq!(format.normalize("9021O"), None);
    }

    #[test]
    fn extract_finds_postal_in_ticket_text() {
        let format = PostalFormat::CaAlphanumeric;
        assert_eq!(
            format
                .extract("...please send to K1A 0B1 asap...")
                .as_deref(),
            Some("K1A0B1")
        );
    }

    #[test]
    fn extract_returns_first_match() {
        let format = PostalFormat::CaAlphanumeric;
        assert_eq!(
            format
                .extract("from m5v 3l9 to H2Y 1C6 tomorrow")
                .as_deref(),
            Some("M5V3L9")
        );
    }

    #[test]
    fn extract_skips_candidates_with_forbidden_letters() {
        let format = PostalFormat::CaAlphanumeric;
        // D1A 0B1 matches the coarse pattern but fails the grammar; the
        // scanner must keep going to the valid code.
        assert_eq!(
            format.extract("ids D1A 0B1 then K2P 1L4").as_deref(),
            Some("K2P1L4")
        );
    }

    #[test]
    fn extract_returns_none_without_match() {
        assert_eq!(PostalFormat::CaAlphanumeric.extract("no codes here"), None);
        assert_eq!(PostalFormat::UsZip.extract("only 123 digits"), None);
    }

    #[test]
    fn extract_us_zip_from_text() {
        assert_eq!(
            PostalFormat::UsZip
                .extract("deliver to 90210-1234 by friday")
                .as_deref(),
            Some("90210")
        );
    }

    #[test]
    fn format_display_inserts_break() {
        assert_eq!(
            PostalFormat::CaAlphanumeric.format_display("K1A0B1"),
            "K1A 0B1"
        );
        assert_eq!(PostalFormat::UsZip.format_display("90210"), "90210");
    }

    #[test]
    fn normalize_format_round_trip_is_idempotent() {
        for (format, raw) in [
            (PostalFormat::CaAlphanumeric, "k1a 0b1"),
            (PostalFormat::CaAlphanumeric, "M5V3L9"),
            (PostalFormat::UsZip, "90210-1234"),
        ] {
            let normalized = format.normalize(raw).unwrap();
            let display = format.format_display(&normalized);
            assert_eq!(format.normalize(&display).as_deref(), Some(normalized.as_str()));
        }
    }

    #[test]
    fn detect_picks_matching_format() {
        assert_eq!(
            PostalFormat::detect("K1A 0B1"),
            Some(PostalFormat::CaAlphanumeric)
        );
        assert_eq!(PostalFormat::detect("90210"), Some(PostalFormat::UsZip));
        assert_eq!(PostalFormat::detect("garbage"), None);
    }

    #[test]
    fn for_country_selects_format() {
        assert_eq!(PostalFormat::for_country("us"), PostalFormat::UsZip);
        assert_eq!(
            PostalFormat::for_country("CA"),
            PostalFormat::CaAlphanumeric
        );
    }
}
