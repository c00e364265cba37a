//! The intra-community country set used for OSS bucketing.
//!
//! EU member states plus EEA and Switzerland, per the Destatis country
//! code list. Customers outside this set fall into the "OSS EXTRACOM"
//! accounting bucket.

/// Check whether `code` is an intra-community (EU/EEA/CH) country code.
pub fn is_intra_community(code: &str) -> bool {
    INTRACOM_COUNTRY_CODES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .is_ok()
}

/// English short name for an intra-community country code, used in the
/// "OSS <country>" bucket label. `None` outside the set.
pub fn intra_community_name(code: &str) -> Option<&'static str> {
    INTRACOM_COUNTRY_CODES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| INTRACOM_COUNTRY_CODES[i].1)
}

/// The 31 intra-community ISO 3166-1 alpha-2 codes with their English
/// short names. Sorted by code for binary search.
static INTRACOM_COUNTRY_CODES: &[(&str, &str)] = &[
    ("AT", "Austria"),
    ("BE", "Belgium"),
    ("BG", "Bulgaria"),
    ("CH", "Switzerland"),
    ("CY", "Cyprus"),
    ("CZ", "Czechia"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("EE", "Estonia"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GR", "Greece"),
    ("HR", "Croatia"),
    ("HU", "Hungary"),
    ("IE", "Ireland"),
    ("IS", "Iceland"),
    ("IT", "Italy"),
    ("LI", "Liechtenstein"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("MT", "Malta"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("RO", "Romania"),
    ("SE", "Sweden"),
    ("SI", "Slovenia"),
    ("SK", "Slovakia"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_countries() {
        assert!(is_intra_community("BE"));
        assert!(is_intra_community("FR"));
        assert!(is_intra_community("DE"));
        // EEA + Switzerland are in the set
        assert!(is_intra_community("NO"));
        assert!(is_intra_community("IS"));
        assert!(is_intra_community("LI"));
        assert!(is_intra_community("CH"));
    }

    #[test]
    fn non_member_countries() {
        assert!(!is_intra_community("US"));
        assert!(!is_intra_community("GB"));
        assert!(!is_intra_community("JP"));
        assert!(!is_intra_community(""));
        assert!(!is_intra_community("be"));
    }

    #[test]
    fn names() {
        assert_eq!(intra_community_name("BE"), Some("Belgium"));
        assert_eq!(intra_community_name("CZ"), Some("Czechia"));
        assert_eq!(intra_community_name("US"), None);
    }

    #[test]
    fn list_is_sorted() {
        for window in INTRACOM_COUNTRY_CODES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "country codes not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }

    #[test]
    fn list_count() {
        assert_eq!(INTRACOM_COUNTRY_CODES.len(), 31);
    }
}
