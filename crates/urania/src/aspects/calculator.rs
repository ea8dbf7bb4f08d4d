use crate::aspects::types::{Aspect, AspectKind};
use crate::ephemeris::Body;

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Classify the separation of two longitudes, returning the aspect and
    /// its deviation from exact.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<(AspectKind, f64)> {
        let angle_diff = angular_separation(lon1, lon2);

        AspectKind::ALL.into_iter().find_map(|kind| {
            let deviation = (angle_diff - kind.exact_angle()).abs();
            (deviation <= kind.orb()).then_some((kind, deviation))
        })
    }

    /// Aspects for every unordered pair of `bodies`.
    ///
    /// Pairs are visited as (i, j) with i < j in slice order, so the output
    /// order follows the order the bodies were given in.
    pub fn compute_aspects(&self, bodies: &[(Body, f64)]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (first, lon1) = bodies[i];
                let (second, lon2) = bodies[j];

                if let Some((kind, orb)) = self.calculate_aspect(lon1, lon2) {
                    aspects.push(Aspect {
                        first,
                        second,
                        kind,
                        first_longitude: lon1,
                        second_longitude: lon2,
                        orb,
                    });
                }
            }
        }
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}
