use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported house systems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Porphyry,
    Regiomontanus,
    Campanus,
    Equal,
    WholeSign,
    Alcabitius,
    Morinus,
    Topocentric,
}

/// (system, ASCII code, name)
const HOUSE_SYSTEMS: &[(HouseSystem, u8, &str)] = &[
    (HouseSystem::Placidus, b'P', "placidus"),
    (HouseSystem::Koch, b'K', "koch"),
    (HouseSystem::Porphyry, b'O', "porphyry"),
    (HouseSystem::Regiomontanus, b'R', "regiomontanus"),
    (HouseSystem::Campanus, b'C', "campanus"),
    (HouseSystem::Equal, b'E', "equal"),
    (HouseSystem::WholeSign, b'W', "whole_sign"),
    (HouseSystem::Alcabitius, b'B', "alcabitius"),
    (HouseSystem::Morinus, b'M', "morinus"),
    (HouseSystem::Topocentric, b'T', "topocentric"),
];

impl HouseSystem {
    /// Single-letter code understood by the ephemeris house routine
    pub fn code(self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .map(|(_, code, _)| *code)
            .unwrap_or(b'P')
    }

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("placidus")
    }

    pub fn from_code(code: u8) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(system, _, _)| *system)
    }

    /// Every accepted selector, codes first
    pub fn valid_selectors() -> Vec<String> {
        HOUSE_SYSTEMS
            .iter()
            .map(|(_, code, name)| format!("{} ({})", *code as char, name))
            .collect()
    }
}

impl FromStr for HouseSystem {
    type Err = String;

    /// Accepts a single-letter code ("P", "w") or a name ("placidus", "whole-sign").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 1 {
            if let Some(system) = HouseSystem::from_code(trimmed.as_bytes()[0]) {
                return Ok(system);
            }
        }
        let name = trimmed.to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, _, n)| *n == name)
            .map(|(system, _, _)| *system)
            .ok_or_else(|| format!("unknown house system: {trimmed}"))
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code() as char)
    }
}
