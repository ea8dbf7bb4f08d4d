#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use urania::ephemeris::{Body, Ephemeris, EphemerisError, GeoLocation, RawHouses};

/// Ephemeris double returning canned positions and counting every call.
pub struct FixedEphemeris {
    pub longitudes: HashMap<Body, f64>,
    pub failing: Vec<Body>,
    pub houses: Option<RawHouses>,
    pub calls: Cell<usize>,
    pub last_system_code: Cell<Option<u8>>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        let longitudes = [
            (Body::Sun, 84.2),
            (Body::Moon, 312.7),
            (Body::Mercury, 70.1),
            (Body::Venus, 42.9),
            (Body::Mars, 5.4),
            (Body::Jupiter, 95.0),
            (Body::Saturn, 294.3),
            (Body::Uranus, 278.8),
            (Body::Neptune, 283.6),
            (Body::Pluto, 225.9),
            (Body::Rahu, 310.5),
        ]
        .into_iter()
        .collect();

        Self {
            longitudes,
            failing: Vec::new(),
            houses: Some(RawHouses {
                cusps: [
                    195.0, 222.0, 254.0, 290.0, 324.0, 352.0, 15.0, 42.0, 74.0, 110.0, 144.0,
                    172.0,
                ],
                ascendant: 195.0,
                mc: 110.0,
            }),
            calls: Cell::new(0),
            last_system_code: Cell::new(None),
        }
    }

    pub fn failing(mut self, body: Body) -> Self {
        self.failing.push(body);
        self
    }

    pub fn without_houses(mut self) -> Self {
        self.houses = None;
        self
    }

    pub fn with_houses(mut self, cusps: [f64; 12], ascendant: f64, mc: f64) -> Self {
        self.houses = Some(RawHouses { cusps, ascendant, mc });
        self
    }

    pub fn with_longitude(mut self, body: Body, lon: f64) -> Self {
        self.longitudes.insert(body, lon);
        self
    }
}

impl Ephemeris for FixedEphemeris {
    fn body_longitude(&self, jd_ut: f64, body: Body) -> Result<f64, EphemerisError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.contains(&body) {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "canned failure".to_string(),
            });
        }
        self.longitudes
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "no canned position".to_string(),
            })
    }

    fn houses(
        &self,
        _jd_ut: f64,
        _location: GeoLocation,
        system_code: u8,
    ) -> Result<RawHouses, EphemerisError> {
        self.calls.set(self.calls.get() + 1);
        self.last_system_code.set(Some(system_code));
        self.houses.ok_or_else(|| EphemerisError::HouseCalculationFailed {
            message: "canned house failure".to_string(),
        })
    }
}
