use crate::aspects::Aspect;
use crate::ephemeris::Body;
use crate::houses::{ChartAngles, HouseCusps, HouseSystem};
use crate::rendering::EncodedImage;
use crate::zodiac::{labels, sign_of, Language, ZodiacPosition};
use serde::{Deserialize, Serialize};

/// One chart angle with its zodiac placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleInfo {
    /// "AC", "IC", "MC" or "DC"
    pub code: String,
    pub name: String,
    pub longitude: f64,
    pub position: ZodiacPosition,
    pub sign_name: String,
}

impl AngleInfo {
    pub fn new(code: &str, longitude: f64, language: Language) -> Self {
        let position = sign_of(longitude);
        Self {
            code: code.to_string(),
            name: labels::angle_name(code, language).to_string(),
            longitude,
            position,
            sign_name: position.sign_name(language).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    pub name: String,
    pub glyph: String,
    pub longitude: f64,
    pub position: ZodiacPosition,
    pub sign_name: String,
    /// House number, 1-12
    pub house: u8,
}

impl BodyPosition {
    pub fn new(body: Body, longitude: f64, house: u8, language: Language) -> Self {
        let position = sign_of(longitude);
        Self {
            body,
            name: labels::body_name(body, language).to_string(),
            glyph: labels::body_glyph(body).to_string(),
            longitude,
            position,
            sign_name: position.sign_name(language).to_string(),
            house,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseInfo {
    pub number: u8,
    pub name: String,
    pub cusp: f64,
    pub position: ZodiacPosition,
    pub sign_name: String,
}

impl HouseInfo {
    pub fn table(cusps: &HouseCusps, language: Language) -> Vec<HouseInfo> {
        cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| {
                let number = (i + 1) as u8;
                let position = sign_of(cusp);
                HouseInfo {
                    number,
                    name: labels::house_name(number, language).to_string(),
                    cusp,
                    position,
                    sign_name: position.sign_name(language).to_string(),
                }
            })
            .collect()
    }
}

/// Everything the presentation layer needs about one natal chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub angles: ChartAngles,
    pub angle_table: Vec<AngleInfo>,
    /// Placed bodies in chart order; bodies the ephemeris failed on are absent
    pub bodies: Vec<BodyPosition>,
    pub cusps: HouseCusps,
    pub houses: Vec<HouseInfo>,
    pub aspects: Vec<Aspect>,
    pub house_system: HouseSystem,
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub local_time: String,
    pub utc_time: String,
    pub utc_offset: String,
    pub julian_day: f64,
    pub dst_notice: String,
    pub language: Language,
}

impl ChartResult {
    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|b| b.body == body)
    }
}

/// A computed chart and its wheel image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOutput {
    pub result: ChartResult,
    pub image: EncodedImage,
}
