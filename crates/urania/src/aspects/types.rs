use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major aspect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Opposition,
    Trine,
    Square,
    Sextile,
}

impl AspectKind {
    /// Every kind in the order they are tried; the first match wins.
    pub const ALL: [AspectKind; 4] = [
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
    ];

    pub const fn exact_angle(self) -> f64 {
        match self {
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
        }
    }

    /// Largest accepted deviation from the exact angle, inclusive
    pub const fn orb(self) -> f64 {
        match self {
            AspectKind::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Opposition => "opposition",
            AspectKind::Trine => "trine",
            AspectKind::Square => "square",
            AspectKind::Sextile => "sextile",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect between two bodies of the same chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    pub first_longitude: f64,
    pub second_longitude: f64,
    /// Deviation from the exact angle, in degrees
    pub orb: f64,
}
