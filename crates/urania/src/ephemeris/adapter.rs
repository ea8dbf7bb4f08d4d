use crate::ephemeris::types::{Body, GeoLocation, RawHouses, ZodiacType};
use crate::zodiac::normalize_degrees;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, houses_ex};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: Body, jd: f64, message: String },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of ecliptic longitudes and house cusps.
///
/// Implementations receive a Julian day in Universal Time and must use the
/// same zodiac frame for every call made while building one chart.
pub trait Ephemeris {
    /// Ecliptic longitude of `body` in degrees. Only the first component
    /// of the position is consumed; latitude, distance and speeds are ignored.
    fn body_longitude(&self, jd_ut: f64, body: Body) -> Result<f64, EphemerisError>;

    /// Cusps, ascendant and MC for the given ASCII house-system code.
    fn houses(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        system_code: u8,
    ) -> Result<RawHouses, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn body_longitude(&self, jd_ut: f64, body: Body) -> Result<f64, EphemerisError> {
        (**self).body_longitude(jd_ut, body)
    }

    fn houses(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        system_code: u8,
    ) -> Result<RawHouses, EphemerisError> {
        (**self).houses(jd_ut, location, system_code)
    }
}

/// Longitude of `body`, or `None` when the ephemeris cannot place it.
///
/// Failures are logged and swallowed so one bad body never sinks a chart.
/// Ketu is never asked of the ephemeris: it is Rahu turned half a circle.
pub fn longitude_of<E: Ephemeris + ?Sized>(ephemeris: &E, jd_ut: f64, body: Body) -> Option<f64> {
    let queried = if body == Body::Ketu { Body::Rahu } else { body };
    match ephemeris.body_longitude(jd_ut, queried) {
        Ok(lon) if lon.is_finite() => {
            let lon = normalize_degrees(lon);
            if body == Body::Ketu {
                Some(normalize_degrees(lon + 180.0))
            } else {
                Some(lon)
            }
        }
        Ok(lon) => {
            log::error!("Ephemeris returned non-finite longitude {} for {}", lon, body);
            None
        }
        Err(e) => {
            log::error!("Error calculating {}: {}", body, e);
            None
        }
    }
}

// The Swiss Ephemeris C library keeps global state; every call goes through this lock.
static SWISS_LOCK: Mutex<()> = Mutex::new(());

const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_SIDEREAL: i32 = 64;

/// Swiss Ephemeris adapter implementation
#[derive(Debug)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    zodiac_type: ZodiacType,
}

impl SwissEphemerisAdapter {
    /// Create an adapter backed by Swiss Ephemeris data files.
    ///
    /// Without an explicit path, `SWISS_EPHEMERIS_PATH` is consulted and then
    /// `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        // TODO: hand the path to swe_set_ephe_path once the binding exposes it;
        // until then the library resolves data files from SE_EPHE_PATH.
        Ok(Self {
            ephemeris_path: Some(path),
            zodiac_type: ZodiacType::Tropical,
        })
    }

    /// Adapter using the built-in Moshier model; needs no data files.
    pub fn builtin() -> Self {
        Self {
            ephemeris_path: None,
            zodiac_type: ZodiacType::Tropical,
        }
    }

    pub fn with_zodiac(mut self, zodiac_type: ZodiacType) -> Self {
        self.zodiac_type = zodiac_type;
        self
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    fn flags(&self) -> i32 {
        let mut flags = if self.ephemeris_path.is_some() {
            FLG_SWIEPH
        } else {
            FLG_MOSEPH
        };
        if self.zodiac_type == ZodiacType::Sidereal {
            flags |= FLG_SIDEREAL;
        }
        flags
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn body_longitude(&self, jd_ut: f64, body: Body) -> Result<f64, EphemerisError> {
        let code = body.swiss_id().ok_or_else(|| EphemerisError::CalculationFailed {
            body,
            jd: jd_ut,
            message: "body has no ephemeris number".to_string(),
        })?;

        let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = calc_ut(jd_ut, code as u32, self.flags() as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        Ok(result.out[0])
    }

    fn houses(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        system_code: u8,
    ) -> Result<RawHouses, EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let (c, a) = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            houses_ex(jd_ut, self.flags(), location.lat, location.lon, system_code as i32)
        };
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        checked_houses(cusp_values, ascmc.ascendant, ascmc.mc, location, system_code)
    }
}

/// Reject non-finite angles or cusps and normalize the rest into [0, 360).
fn checked_houses(
    cusps: [f64; 12],
    ascendant: f64,
    mc: f64,
    location: GeoLocation,
    system_code: u8,
) -> Result<RawHouses, EphemerisError> {
    if !ascendant.is_finite() || !mc.is_finite() {
        return Err(EphemerisError::HouseCalculationFailed {
            message: format!(
                "non-finite angles for system '{}' at lat {}, lon {}",
                system_code as char, location.lat, location.lon
            ),
        });
    }
    if cusps.iter().any(|c| !c.is_finite()) {
        return Err(EphemerisError::HouseCalculationFailed {
            message: format!("non-finite cusps for system '{}'", system_code as char),
        });
    }

    Ok(RawHouses {
        cusps: cusps.map(normalize_degrees),
        ascendant: normalize_degrees(ascendant),
        mc: normalize_degrees(mc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Ephemeris for Broken {
        fn body_longitude(&self, jd_ut: f64, body: Body) -> Result<f64, EphemerisError> {
            if body == Body::Mars {
                Err(EphemerisError::CalculationFailed {
                    body,
                    jd: jd_ut,
                    message: "boom".to_string(),
                })
            } else {
                Ok(-10.0)
            }
        }

        fn houses(&self, _: f64, _: GeoLocation, _: u8) -> Result<RawHouses, EphemerisError> {
            Err(EphemerisError::HouseCalculationFailed {
                message: "unused".to_string(),
            })
        }
    }

    #[test]
    fn test_longitude_of_skips_failed_body() {
        assert_eq!(longitude_of(&Broken, 2451545.0, Body::Mars), None);
    }

    #[test]
    fn test_longitude_of_normalizes_and_derives_ketu() {
        assert_eq!(longitude_of(&Broken, 2451545.0, Body::Sun), Some(350.0));
        assert_eq!(longitude_of(&Broken, 2451545.0, Body::Ketu), Some(170.0));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let result = SwissEphemerisAdapter::new(Some(PathBuf::from("/definitely/not/here")));
        assert!(matches!(result, Err(EphemerisError::FileNotFound { .. })));
    }

    fn polar_circle() -> GeoLocation {
        GeoLocation { lat: 80.0, lon: 15.0 }
    }

    #[test]
    fn test_non_finite_angles_fail_the_house_calculation() {
        let cusps = [0.0; 12];
        for (asc, mc) in [(f64::NAN, 90.0), (10.0, f64::INFINITY)] {
            let result = checked_houses(cusps, asc, mc, polar_circle(), b'P');
            match result {
                Err(EphemerisError::HouseCalculationFailed { message }) => {
                    assert!(message.contains("angles"));
                    assert!(message.contains("'P'"));
                }
                other => panic!("expected house failure, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_finite_cusp_fails_the_house_calculation() {
        let mut cusps = [30.0; 12];
        cusps[7] = f64::NAN;
        let result = checked_houses(cusps, 10.0, 280.0, polar_circle(), b'K');
        match result {
            Err(EphemerisError::HouseCalculationFailed { message }) => {
                assert!(message.contains("cusps"));
            }
            other => panic!("expected house failure, got {:?}", other),
        }
    }

    #[test]
    fn test_finite_houses_are_normalized() {
        let mut cusps = [30.0; 12];
        cusps[0] = -15.0;
        cusps[11] = 390.0;
        let houses = checked_houses(cusps, -15.0, 360.0, polar_circle(), b'P').unwrap();
        assert_eq!(houses.cusps[0], 345.0);
        assert_eq!(houses.cusps[11], 30.0);
        assert_eq!(houses.ascendant, 345.0);
        assert_eq!(houses.mc, 0.0);
    }

    #[test]
    fn test_ketu_has_no_swiss_id() {
        assert_eq!(Body::Ketu.swiss_id(), None);
        assert_eq!(Body::Rahu.swiss_id(), Some(10));
    }
}
