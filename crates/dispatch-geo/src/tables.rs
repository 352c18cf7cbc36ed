//! Static geographic reference tables.
//!
//! Read-only lookup data behind the tiered resolver: curated coordinate
//! overrides for postal codes we have seen technicians at, city and
//! provincial/state centroids, postal-prefix→region derivation rules, and
//! the per-region road-curvature penalty factors. All immutable after load.

use dispatch_core::GeoPoint;

use crate::postal::PostalFormat;

/// Fallback curvature multiplier for regions without an empirical entry.
pub const DEFAULT_ROAD_FACTOR: f64 = 6.0;

/// Curated exact coordinates for normalized postal codes, sourced from
/// known technician home bases sharing the code.
const POSTAL_OVERRIDES: &[(&str, GeoPoint)] = &[
    ("K1A0B1", GeoPoint { lat: 45.421_5, lng: -75.697_2 }),
    ("K2P1L4", GeoPoint { lat: 45.416_5, lng: -75.689_0 }),
    ("M5V3L9", GeoPoint { lat: 43.642_6, lng: -79.387_1 }),
    ("H2Y1C6", GeoPoint { lat: 45.508_8, lng: -73.554_2 }),
    ("V6B4Y8", GeoPoint { lat: 49.278_0, lng: -123.110_2 }),
    ("T2P2M5", GeoPoint { lat: 51.044_7, lng: -114.071_9 }),
    ("B3H4R2", GeoPoint { lat: 44.636_6, lng: -63.591_8 }),
    ("R3C4T3", GeoPoint { lat: 49.887_7, lng: -97.139_3 }),
    ("S4P3Y2", GeoPoint { lat: 50.445_2, lng: -104.618_9 }),
    ("90210", GeoPoint { lat: 34.090_1, lng: -118.406_5 }),
    ("10001", GeoPoint { lat: 40.750_6, lng: -73.997_1 }),
];

/// City centroids keyed by (uppercased city, region code).
const CITY_CENTROIDS: &[(&str, &str, GeoPoint)] = &[
    ("TORONTO", "ON", GeoPoint { lat: 43.653_2, lng: -79.383_2 }),
    ("OTTAWA", "ON", GeoPoint { lat: 45.421_5, lng: -75.697_2 }),
    ("MISSISSAUGA", "ON", GeoPoint { lat: 43.589_0, lng: -79.644_1 }),
    ("HAMILTON", "ON", GeoPoint { lat: 43.255_7, lng: -79.871_1 }),
    ("LONDON", "ON", GeoPoint { lat: 42.984_9, lng: -81.245_3 }),
    ("KITCHENER", "ON", GeoPoint { lat: 43.451_6, lng: -80.492_5 }),
    ("WINDSOR", "ON", GeoPoint { lat: 42.300_1, lng: -83.017_0 }),
    ("SUDBURY", "ON", GeoPoint { lat: 46.491_7, lng: -80.993_0 }),
    ("THUNDER BAY", "ON", GeoPoint { lat: 48.380_9, lng: -89.247_7 }),
    ("MONTREAL", "QC", GeoPoint { lat: 45.501_7, lng: -73.567_3 }),
    ("QUEBEC", "QC", GeoPoint { lat: 46.813_9, lng: -71.208_0 }),
    ("LAVAL", "QC", GeoPoint { lat: 45.606_6, lng: -73.712_4 }),
    ("GATINEAU", "QC", GeoPoint { lat: 45.476_5, lng: -75.701_3 }),
    ("SHERBROOKE", "QC", GeoPoint { lat: 45.404_2, lng: -71.892_9 }),
    ("VANCOUVER", "BC", GeoPoint { lat: 49.282_7, lng: -123.120_7 }),
    ("VICTORIA", "BC", GeoPoint { lat: 48.428_4, lng: -123.365_6 }),
    ("SURREY", "BC", GeoPoint { lat: 49.191_3, lng: -122.849_0 }),
    ("KELOWNA", "BC", GeoPoint { lat: 49.887_9, lng: -119.496_0 }),
    ("PRINCE GEORGE", "BC", GeoPoint { lat: 53.917_1, lng: -122.749_7 }),
    ("CALGARY", "AB", GeoPoint { lat: 51.044_7, lng: -114.071_9 }),
    ("EDMONTON", "AB", GeoPoint { lat: 53.546_1, lng: -113.493_8 }),
    ("RED DEER", "AB", GeoPoint { lat: 52.268_1, lng: -113.811_2 }),
    ("WINNIPEG", "MB", GeoPoint { lat: 49.895_1, lng: -97.138_4 }),
    ("REGINA", "SK", GeoPoint { lat: 50.445_2, lng: -104.618_9 }),
    ("SASKATOON", "SK", GeoPoint { lat: 52.157_9, lng: -106.670_2 }),
    ("HALIFAX", "NS", GeoPoint { lat: 44.648_8, lng: -63.575_2 }),
    ("MONCTON", "NB", GeoPoint { lat: 46.087_8, lng: -64.778_2 }),
    ("SAINT JOHN", "NB", GeoPoint { lat: 45.273_3, lng: -66.063_3 }),
    ("FREDERICTON", "NB", GeoPoint { lat: 45.963_6, lng: -66.643_1 }),
    ("ST. JOHN'S", "NL", GeoPoint { lat: 47.561_5, lng: -52.712_6 }),
    ("CHARLOTTETOWN", "PE", GeoPoint { lat: 46.238_2, lng: -63.131_1 }),
    ("WHITEHORSE", "YT", GeoPoint { lat: 60.721_2, lng: -135.056_8 }),
    ("YELLOWKNIFE", "NT", GeoPoint { lat: 62.454_0, lng: -114.371_8 }),
    ("NEW YORK", "NY", GeoPoint { lat: 40.712_8, lng: -74.006_0 }),
    ("LOS ANGELES", "CA", GeoPoint { lat: 34.052_2, lng: -118.243_7 }),
    ("CHICAGO", "IL", GeoPoint { lat: 41.878_1, lng: -87.629_8 }),
    ("HOUSTON", "TX", GeoPoint { lat: 29.760_4, lng: -95.369_8 }),
    ("PHOENIX", "AZ", GeoPoint { lat: 33.448_4, lng: -112.074_0 }),
    ("SEATTLE", "WA", GeoPoint { lat: 47.606_2, lng: -122.332_1 }),
    ("DENVER", "CO", GeoPoint { lat: 39.739_2, lng: -104.990_3 }),
    ("ATLANTA", "GA", GeoPoint { lat: 33.749_0, lng: -84.388_0 }),
    ("BOSTON", "MA", GeoPoint { lat: 42.360_1, lng: -71.058_9 }),
    ("MIAMI", "FL", GeoPoint { lat: 25.761_7, lng: -80.191_8 }),
];

/// Provincial/state geographic centroids keyed by region code.
const REGION_CENTROIDS: &[(&str, GeoPoint)] = &[
    // Canada
    ("AB", GeoPoint { lat: 53.933_3, lng: -116.576_5 }),
    ("BC", GeoPoint { lat: 53.726_7, lng: -127.647_6 }),
    ("MB", GeoPoint { lat: 53.760_9, lng: -98.813_9 }),
    ("NB", GeoPoint { lat: 46.565_3, lng: -66.461_9 }),
    ("NL", GeoPoint { lat: 53.135_5, lng: -57.660_4 }),
    ("NS", GeoPoint { lat: 44.682_0, lng: -63.744_3 }),
    ("NT", GeoPoint { lat: 64.825_5, lng: -124.845_7 }),
    ("NU", GeoPoint { lat: 70.299_8, lng: -83.107_6 }),
    ("ON", GeoPoint { lat: 51.253_8, lng: -85.323_2 }),
    ("PE", GeoPoint { lat: 46.510_7, lng: -63.416_8 }),
    ("QC", GeoPoint { lat: 52.939_9, lng: -73.549_1 }),
    ("SK", GeoPoint { lat: 52.939_9, lng: -106.450_9 }),
    ("YT", GeoPoint { lat: 64.282_3, lng: -135.0 }),
    // United States
    ("AK", GeoPoint { lat: 64.200_8, lng: -149.493_7 }),
    ("AL", GeoPoint { lat: 32.318_2, lng: -86.902_3 }),
    ("AR", GeoPoint { lat: 35.201_0, lng: -91.831_8 }),
    ("AZ", GeoPoint { lat: 34.048_9, lng: -111.093_7 }),
    ("CA", GeoPoint { lat: 36.778_3, lng: -119.417_9 }),
    ("CO", GeoPoint { lat: 39.550_1, lng: -105.782_1 }),
    ("CT", GeoPoint { lat: 41.603_2, lng: -73.087_7 }),
    ("DC", GeoPoint { lat: 38.905_9, lng: -77.033_7 }),
    ("DE", GeoPoint { lat: 38.910_8, lng: -75.527_7 }),
    ("FL", GeoPoint { lat: 27.664_8, lng: -81.515_8 }),
    ("GA", GeoPoint { lat: 32.157_4, lng: -82.907_1 }),
    ("HI", GeoPoint { lat: 19.898_2, lng: -155.665_9 }),
    ("IA", GeoPoint { lat: 41.878_0, lng: -93.097_7 }),
    ("ID", GeoPoint { lat: 44.068_2, lng: -114.742_0 }),
    ("IL", GeoPoint { lat: 40.633_1, lng: -89.398_5 }),
    ("IN", GeoPoint { lat: 40.267_2, lng: -86.134_9 }),
    ("KS", GeoPoint { lat: 39.011_9, lng: -98.484_2 }),
    ("KY", GeoPoint { lat: 37.839_3, lng: -84.270_0 }),
    ("LA", GeoPoint { lat: 30.984_3, lng: -91.962_3 }),
    ("MA", GeoPoint { lat: 42.407_2, lng: -71.382_4 }),
    ("MD", GeoPoint { lat: 39.045_8, lng: -76.641_3 }),
    ("ME", GeoPoint { lat: 45.253_8, lng: -69.445_5 }),
    ("MI", GeoPoint { lat: 44.314_8, lng: -85.602_4 }),
    ("MN", GeoPoint { lat: 46.729_6, lng: -94.685_9 }),
    ("MO", GeoPoint { lat: 37.964_3, lng: -91.831_8 }),
    ("MS", GeoPoint { lat: 32.354_7, lng: -89.398_5 }),
    ("MT", GeoPoint { lat: 46.879_7, lng: -110.362_6 }),
    ("NC", GeoPoint { lat: 35.759_6, lng: -79.019_3 }),
    ("ND", GeoPoint { lat: 47.551_5, lng: -101.002_0 }),
    ("NE", GeoPoint { lat: 41.492_5, lng: -99.901_8 }),
    ("NH", GeoPoint { lat: 43.193_9, lng: -71.572_4 }),
    ("NJ", GeoPoint { lat: 40.058_3, lng: -74.405_7 }),
    ("NM", GeoPoint { lat: 34.519_9, lng: -105.870_1 }),
    ("NV", GeoPoint { lat: 38.802_6, lng: -116.419_4 }),
    ("NY", GeoPoint { lat: 43.299_4, lng: -74.217_9 }),
    ("OH", GeoPoint { lat: 40.417_3, lng: -82.907_1 }),
    ("OK", GeoPoint { lat: 35.007_8, lng: -97.092_9 }),
    ("OR", GeoPoint { lat: 43.804_1, lng: -120.554_2 }),
    ("PA", GeoPoint { lat: 41.203_3, lng: -77.194_5 }),
    ("RI", GeoPoint { lat: 41.580_1, lng: -71.477_4 }),
    ("SC", GeoPoint { lat: 33.836_1, lng: -81.163_7 }),
    ("SD", GeoPoint { lat: 43.969_5, lng: -99.901_8 }),
    ("TN", GeoPoint { lat: 35.517_5, lng: -86.580_4 }),
    ("TX", GeoPoint { lat: 31.968_6, lng: -99.901_8 }),
    ("UT", GeoPoint { lat: 39.320_9, lng: -111.093_7 }),
    ("VA", GeoPoint { lat: 37.431_6, lng: -78.656_9 }),
    ("VT", GeoPoint { lat: 44.558_8, lng: -72.577_8 }),
    ("WA", GeoPoint { lat: 47.751_1, lng: -120.740_1 }),
    ("WI", GeoPoint { lat: 43.784_4, lng: -88.787_9 }),
    ("WV", GeoPoint { lat: 38.597_6, lng: -80.454_9 }),
    ("WY", GeoPoint { lat: 43.076_0, lng: -107.290_3 }),
];

/// Empirically chosen road-curvature multipliers applied when the ticket
/// coordinate is only region-precise. Island, mountain, and ferry-heavy
/// regions understate real driving distance the most.
const REGION_ROAD_FACTORS: &[(&str, f64)] = &[
    ("AB", 5.0),
    ("BC", 8.5),
    ("MB", 5.0),
    ("NB", 6.0),
    ("NL", 9.0),
    ("NS", 6.5),
    ("NT", 10.0),
    ("NU", 12.0),
    ("ON", 5.5),
    ("PE", 5.5),
    ("QC", 5.5),
    ("SK", 4.5),
    ("YT", 9.0),
    ("AK", 10.0),
    ("MT", 6.5),
    ("WV", 7.5),
];

/// Canadian forward-sortation first letter → province.
const CA_LETTER_REGIONS: &[(char, &str)] = &[
    ('A', "NL"),
    ('B', "NS"),
    ('C', "PE"),
    ('E', "NB"),
    ('G', "QC"),
    ('H', "QC"),
    ('J', "QC"),
    ('K', "ON"),
    ('L', "ON"),
    ('M', "ON"),
    ('N', "ON"),
    ('P', "ON"),
    ('R', "MB"),
    ('S', "SK"),
    ('T', "AB"),
    ('V', "BC"),
    ('X', "NT"),
    ('Y', "YT"),
];

/// US 3-digit zip prefix bands → state (inclusive ranges).
const US_ZIP_BANDS: &[(u32, u32, &str)] = &[
    (10, 27, "MA"),
    (28, 29, "RI"),
    (30, 38, "NH"),
    (39, 49, "ME"),
    (50, 59, "VT"),
    (60, 69, "CT"),
    (70, 89, "NJ"),
    (100, 149, "NY"),
    (150, 196, "PA"),
    (197, 199, "DE"),
    (200, 205, "DC"),
    (206, 219, "MD"),
    (220, 246, "VA"),
    (247, 268, "WV"),
    (270, 289, "NC"),
    (290, 299, "SC"),
    (300, 319, "GA"),
    (320, 349, "FL"),
    (350, 369, "AL"),
    (370, 385, "TN"),
    (386, 397, "MS"),
    (398, 399, "GA"),
    (400, 427, "KY"),
    (430, 459, "OH"),
    (460, 479, "IN"),
    (480, 499, "MI"),
    (500, 528, "IA"),
    (530, 549, "WI"),
    (550, 567, "MN"),
    (570, 577, "SD"),
    (580, 588, "ND"),
    (590, 599, "MT"),
    (600, 629, "IL"),
    (630, 658, "MO"),
    (660, 679, "KS"),
    (680, 693, "NE"),
    (700, 714, "LA"),
    (716, 729, "AR"),
    (730, 749, "OK"),
    (750, 799, "TX"),
    (800, 816, "CO"),
    (820, 831, "WY"),
    (832, 838, "ID"),
    (840, 847, "UT"),
    (850, 865, "AZ"),
    (870, 884, "NM"),
    (885, 885, "TX"),
    (889, 898, "NV"),
    (900, 961, "CA"),
    (967, 968, "HI"),
    (970, 979, "OR"),
    (980, 994, "WA"),
    (995, 999, "AK"),
];

/// Canadian province full names → codes, for roster region hints that spell
/// the province out.
const CA_PROVINCE_NAMES: &[(&str, &str)] = &[
    ("ALBERTA", "AB"),
    ("BRITISH COLUMBIA", "BC"),
    ("MANITOBA", "MB"),
    ("NEW BRUNSWICK", "NB"),
    ("NEWFOUNDLAND", "NL"),
    ("NEWFOUNDLAND AND LABRADOR", "NL"),
    ("NORTHWEST TERRITORIES", "NT"),
    ("NOVA SCOTIA", "NS"),
    ("NUNAVUT", "NU"),
    ("ONTARIO", "ON"),
    ("PRINCE EDWARD ISLAND", "PE"),
    ("QUEBEC", "QC"),
    ("QUÉBEC", "QC"),
    ("SASKATCHEWAN", "SK"),
    ("YUKON", "YT"),
];

/// Exact coordinate override for a normalized postal code.
#[must_use]
pub fn postal_override(postal: &str) -> Option<GeoPoint> {
    POSTAL_OVERRIDES
        .iter()
        .find(|(code, _)| *code == postal)
        .map(|(_, point)| *point)
}

/// Centroid for an uppercased (city, region code) pair.
#[must_use]
pub fn city_centroid(city: &str, region: &str) -> Option<GeoPoint> {
    CITY_CENTROIDS
        .iter()
        .find(|(c, r, _)| *c == city && *r == region)
        .map(|(_, _, point)| *point)
}

/// Geographic centroid for a region code.
#[must_use]
pub fn region_centroid(region: &str) -> Option<GeoPoint> {
    REGION_CENTROIDS
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, point)| *point)
}

/// Road-curvature multiplier for a region, or [`DEFAULT_ROAD_FACTOR`] when
/// the region is unlisted or unknown.
#[must_use]
pub fn road_factor(region: Option<&str>) -> f64 {
    region
        .and_then(|r| {
            REGION_ROAD_FACTORS
                .iter()
                .find(|(code, _)| *code == r)
                .map(|(_, factor)| *factor)
        })
        .unwrap_or(DEFAULT_ROAD_FACTOR)
}

/// Derives the region code from a normalized postal code's prefix.
///
/// Deterministic and total over valid prefixes; unrecognized prefixes yield
/// `None`, which cascades to an unresolved coordinate downstream.
#[must_use]
pub fn region_from_postal(format: PostalFormat, postal: &str) -> Option<&'static str> {
    match format {
        PostalFormat::CaAlphanumeric => {
            let first = postal.chars().next()?;
            CA_LETTER_REGIONS
                .iter()
                .find(|(letter, _)| *letter == first)
                .map(|(_, region)| *region)
        }
        PostalFormat::UsZip => {
            let prefix: u32 = postal.get(..3)?.parse().ok()?;
            US_ZIP_BANDS
                .iter()
                .find(|(start, end, _)| prefix >= *start && prefix <= *end)
                .map(|(_, _, region)| *region)
        }
    }
}

/// Normalizes a free-text region hint into a known region code.
///
/// Two-letter hints are uppercased and checked against the centroid table;
/// longer hints go through the province-name table.
#[must_use]
pub fn canonical_region(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    if upper.len() == 2 {
        return region_centroid(&upper).map(|_| upper);
    }
    CA_PROVINCE_NAMES
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, code)| (*code).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_override_hits_curated_code() {
        let point = postal_override("K1A0B1").unwrap();
        assert!((point.lat - 45.421_5).abs() < 0.001);
    }

    #[test]
    fn postal_override_misses_unknown_code() {
        assert_eq!(postal_override("Z9Z9Z9"), None);
    }

    #[test]
    fn city_centroid_requires_matching_region() {
        assert!(city_centroid("TORONTO", "ON").is_some());
        assert_eq!(city_centroid("TORONTO", "BC"), None);
        // London ON must not shadow into another region.
        assert!(city_centroid("LONDON", "ON").is_some());
    }

    #[test]
    fn every_ca_letter_region_has_a_centroid() {
        for (_, region) in CA_LETTER_REGIONS {
            assert!(
                region_centroid(region).is_some(),
                "no centroid for derivable region {region}"
            );
        }
    }

    #[test]
    fn every_us_band_region_has_a_centroid() {
        for (_, _, region) in US_ZIP_BANDS {
            assert!(
                region_centroid(region).is_some(),
                "no centroid for derivable region {region}"
            );
        }
    }

    #[test]
    fn region_from_ca_postal_first_letter() {
        assert_eq!(
            region_from_postal(PostalFormat::CaAlphanumeric, "K1A0B1"),
            Some("ON")
        );
        assert_eq!(
            region_from_postal(PostalFormat::CaAlphanumeric, "V6B4Y8"),
            Some("BC")
        );
        assert_eq!(
            region_from_postal(PostalFormat::CaAlphanumeric, "H2Y1C6"),
            Some("QC")
        );
    }

    #[test]
    fn region_from_us_zip_band() {
        assert_eq!(region_from_postal(PostalFormat::UsZip, "90210"), Some("CA"));
        assert_eq!(region_from_postal(PostalFormat::UsZip, "10001"), Some("NY"));
        assert_eq!(region_from_postal(PostalFormat::UsZip, "02139"), Some("MA"));
    }

    #[test]
    fn region_from_unknown_prefix_is_none() {
        // Z is not a valid forward-sortation letter; 004 falls in no band.
        assert_eq!(region_from_postal(PostalFormat::CaAlphanumeric, "Z1A0B1"), None);
        assert_eq!(region_from_postal(PostalFormat::UsZip, "00499"), None);
    }

    #[test]
    fn road_factor_defaults_for_unlisted_region() {
        assert!((road_factor(Some("ON")) - 5.5).abs() < f64::EPSILON);
        assert!((road_factor(Some("TX")) - DEFAULT_ROAD_FACTOR).abs() < f64::EPSILON);
        assert!((road_factor(None) - DEFAULT_ROAD_FACTOR).abs() < f64::EPSILON);
    }

    #[test]
    fn canonical_region_accepts_codes_and_names() {
        assert_eq!(canonical_region("on").as_deref(), Some("ON"));
        assert_eq!(canonical_region("Ontario").as_deref(), Some("ON"));
        assert_eq!(canonical_region("british columbia").as_deref(), Some("BC"));
        assert_eq!(canonical_region("Atlantis"), None);
        assert_eq!(canonical_region("ZZ"), None);
    }
}
