//! House assignment over a circular cusp sequence.

use crate::zodiac::sign::normalize_degrees;

/// Whether `longitude` lies in the half-open arc [start, end), walking
/// forward through the zodiac. Arcs with start >= end wrap through 0 deg.
pub fn in_circular_interval(longitude: f64, start: f64, end: f64) -> bool {
    if start < end {
        start <= longitude && longitude < end
    } else {
        longitude >= start || longitude < end
    }
}

/// House number (1-12) containing `longitude`.
///
/// Cusp `i` opens house `i + 1`. A cusp list shorter than twelve entries
/// yields house 1 rather than an error; callers that need strictness must
/// validate the cusps themselves.
pub fn house_of(longitude: f64, cusps: &[f64]) -> u8 {
    if cusps.len() < 12 {
        return 1;
    }

    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        let start = normalize_degrees(cusps[i]);
        let end = normalize_degrees(cusps[(i + 1) % 12]);
        if in_circular_interval(lon, start, end) {
            return (i + 1) as u8;
        }
    }

    1
}

/// Angular midpoint of house `index` (0-based, taken modulo 12), following
/// the arc forward from its cusp to the next one. `None` for a cusp list
/// shorter than twelve entries.
pub fn house_midpoint(cusps: &[f64], index: usize) -> Option<f64> {
    if cusps.len() < 12 {
        return None;
    }
    let start = cusps[index % 12];
    let next = cusps[(index + 1) % 12];
    let span = (next - start).rem_euclid(360.0);
    Some(normalize_degrees(start + span / 2.0))
}
