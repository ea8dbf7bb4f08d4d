use crate::ephemeris::{Ephemeris, EphemerisError, GeoLocation};
use crate::houses::system::HouseSystem;
use crate::zodiac::{house_midpoint, house_of, normalize_degrees, sign_of, SIGN_SPAN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HouseError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Twelve cusp longitudes; `cusps[i]` opens house `i + 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseCusps(pub [f64; 12]);

impl HouseCusps {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// House number (1-12) containing `longitude`
    pub fn house_of(&self, longitude: f64) -> u8 {
        house_of(longitude, &self.0)
    }

    /// Midpoint of house `index` (0-based)
    pub fn midpoint(&self, index: usize) -> f64 {
        house_midpoint(&self.0, index).unwrap_or(self.0[index % 12])
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

/// The four chart angles. IC and DC are always derived from MC and AC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub imum_coeli: f64,
    pub descendant: f64,
}

impl ChartAngles {
    pub fn from_ascendant_and_mc(ascendant: f64, midheaven: f64) -> Self {
        let ascendant = normalize_degrees(ascendant);
        let midheaven = normalize_degrees(midheaven);
        Self {
            ascendant,
            midheaven,
            imum_coeli: normalize_degrees(midheaven + 180.0),
            descendant: normalize_degrees(ascendant + 180.0),
        }
    }

    /// (code, longitude) in display order: AC, IC, MC, DC
    pub fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("AC", self.ascendant),
            ("IC", self.imum_coeli),
            ("MC", self.midheaven),
            ("DC", self.descendant),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCalculation {
    pub system: HouseSystem,
    pub cusps: HouseCusps,
    pub angles: ChartAngles,
}

/// Whole-sign cusps: house 1 starts at the beginning of the ascendant's sign
/// and every following house is the next sign.
pub fn whole_sign_cusps(ascendant: f64) -> HouseCusps {
    let asc_sign = sign_of(ascendant).sign_index as usize;
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = ((asc_sign + i) % 12) as f64 * SIGN_SPAN;
    }
    HouseCusps(cusps)
}

/// Compute cusps and angles for `system` at `jd_ut`.
pub fn compute_houses<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    location: GeoLocation,
    system: HouseSystem,
) -> Result<HouseCalculation, HouseError> {
    let raw = ephemeris.houses(jd_ut, location, system.code())?;
    let angles = ChartAngles::from_ascendant_and_mc(raw.ascendant, raw.mc);

    log::info!("House system: {}", system.name());
    log::info!("Ascendant (AC): {:.2}°", angles.ascendant);
    log::info!("MC: {:.2}°", angles.midheaven);

    let cusps = if system == HouseSystem::WholeSign {
        let cusps = whole_sign_cusps(angles.ascendant);
        log::info!(
            "Whole Sign houses calculated. ASC sign index: {}",
            sign_of(angles.ascendant).sign_index
        );
        cusps
    } else {
        HouseCusps(raw.cusps.map(normalize_degrees))
    };

    Ok(HouseCalculation {
        system,
        cusps,
        angles,
    })
}
