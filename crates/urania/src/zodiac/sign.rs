//! Longitude to zodiac sign conversion.

use crate::zodiac::labels::{self, Language};
use serde::{Deserialize, Serialize};

/// Width of one zodiac sign in degrees
pub const SIGN_SPAN: f64 = 30.0;

/// Normalize any real longitude into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Position of a longitude within the zodiac
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPosition {
    /// Sign index, 0 = Aries .. 11 = Pisces
    pub sign_index: u8,
    /// Degrees within the sign, in [0, 30)
    pub degree_in_sign: f64,
}

impl ZodiacPosition {
    pub fn sign_name(&self, language: Language) -> &'static str {
        labels::sign_name(self.sign_index, language)
    }

    pub fn sign_glyph(&self) -> &'static str {
        labels::sign_glyph(self.sign_index)
    }

    /// Whole degrees within the sign, as printed next to chart glyphs.
    pub fn whole_degrees(&self) -> u32 {
        self.degree_in_sign.floor() as u32
    }
}

/// Convert a longitude to its sign index and degree within that sign.
///
/// Total over all finite inputs; negative longitudes wrap with floor
/// semantics so -1 deg lands at Pisces 29.
pub fn sign_of(longitude: f64) -> ZodiacPosition {
    let lon = normalize_degrees(longitude);
    let mut index = (lon / SIGN_SPAN).floor() as i32;
    let mut degree = lon - index as f64 * SIGN_SPAN;

    if degree < 0.0 {
        index -= 1;
        degree += SIGN_SPAN;
    } else if degree >= SIGN_SPAN {
        index += 1;
        degree -= SIGN_SPAN;
    }

    ZodiacPosition {
        sign_index: index.rem_euclid(12) as u8,
        degree_in_sign: degree,
    }
}
