//! Julian day numbers for UTC instants.

use chrono::{DateTime, Datelike, Timelike, Utc};
use swisseph::swe::julday;

const GREGORIAN: u32 = 1;

/// Convert a UTC instant to a Julian day in Universal Time.
///
/// Delegates to `swe_julday` so the epoch is exactly the one the ephemeris
/// expects.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;

    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREGORIAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_j2000_epoch() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(julian_day(dt), 2451545.0);
    }

    #[test]
    fn test_unix_epoch() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(julian_day(dt), 2440587.5);
    }

    #[test]
    fn test_minutes_are_fractional_days() {
        let a = Utc.with_ymd_and_hms(1990, 6, 15, 6, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(1990, 6, 15, 6, 30, 0).unwrap();
        assert!((julian_day(b) - julian_day(a) - 30.0 / 1440.0).abs() < 1e-9);
    }

    #[test]
    fn test_gregorian_calendar_before_1582_reform_is_proleptic() {
        // 1582-10-15 (first Gregorian day) follows 1582-10-04 Julian; the
        // proleptic Gregorian 1582-10-14 is exactly one day earlier
        let a = Utc.with_ymd_and_hms(1582, 10, 15, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(1582, 10, 14, 0, 0, 0).unwrap();
        assert_eq!(julian_day(a), 2299160.5);
        assert_eq!(julian_day(a) - julian_day(b), 1.0);
    }
}
