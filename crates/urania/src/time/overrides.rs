//! Country-level corrections for timezone lookups that are known to be wrong.

/// (aliases, timezone) pairs; aliases are matched case-insensitively as substrings.
const COUNTRY_TIMEZONES: &[(&[&str], &str)] = &[
    (
        &["syria", "سوريا", "syrian", "syrian arab republic", "سورية"],
        "Asia/Damascus",
    ),
    (&["jordan", "الأردن", "jordanian"], "Asia/Amman"),
    (
        &["saudi arabia", "السعودية", "المملكة العربية السعودية", "saudi", "ksa"],
        "Asia/Riyadh",
    ),
];

/// Replace `timezone` with the canonical zone for `country` when the country
/// is one with a known bad mapping; otherwise return it unchanged.
pub fn apply_country_override(timezone: &str, country: &str) -> String {
    let country = country.trim().to_lowercase();
    for (aliases, zone) in COUNTRY_TIMEZONES {
        if aliases.iter().any(|alias| country.contains(alias)) {
            if timezone != *zone {
                log::info!("Overriding timezone from {} to {} for {}", timezone, zone, country);
            }
            return zone.to_string();
        }
    }
    timezone.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syria_forced_to_damascus() {
        assert_eq!(apply_country_override("Europe/Moscow", "Syria"), "Asia/Damascus");
        assert_eq!(apply_country_override("Europe/Moscow", " سوريا "), "Asia/Damascus");
    }

    #[test]
    fn test_other_countries_untouched() {
        assert_eq!(apply_country_override("Europe/Berlin", "Germany"), "Europe/Berlin");
    }

    #[test]
    fn test_ksa_alias() {
        assert_eq!(apply_country_override("Asia/Baghdad", "KSA"), "Asia/Riyadh");
    }
}
