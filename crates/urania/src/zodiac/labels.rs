//! Static label tables for signs, bodies, houses and angles.

use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label set used for user-facing text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ar" | "arabic" => Ok(Language::Arabic),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "en"),
            Language::Arabic => write!(f, "ar"),
        }
    }
}

const SIGN_NAMES_EN: [&str; 12] = [
    "Aries", "Taurus", "Gemini", "Cancer", "Leo", "Virgo",
    "Libra", "Scorpio", "Sagittarius", "Capricorn", "Aquarius", "Pisces",
];

const SIGN_NAMES_AR: [&str; 12] = [
    "الحمل", "الثور", "الجوزاء", "السرطان", "الأسد", "العذراء",
    "الميزان", "العقرب", "القوس", "الجدي", "الدلو", "الحوت",
];

const SIGN_GLYPHS: [&str; 12] = [
    "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
];

const HOUSE_NAMES_AR: [&str; 12] = [
    "الأول (الطالع)", "الثاني", "الثالث", "الرابع (قاع السماء)", "الخامس", "السادس",
    "السابع (الهابط)", "الثامن", "التاسع", "العاشر (وسط السماء)", "الحادي عشر", "الثاني عشر",
];

const HOUSE_NAMES_EN: [&str; 12] = [
    "1st (Ascendant)", "2nd", "3rd", "4th (Imum Coeli)", "5th", "6th",
    "7th (Descendant)", "8th", "9th", "10th (Midheaven)", "11th", "12th",
];

pub fn sign_name(sign_index: u8, language: Language) -> &'static str {
    let idx = (sign_index % 12) as usize;
    match language {
        Language::English => SIGN_NAMES_EN[idx],
        Language::Arabic => SIGN_NAMES_AR[idx],
    }
}

pub fn sign_glyph(sign_index: u8) -> &'static str {
    SIGN_GLYPHS[(sign_index % 12) as usize]
}

/// Name of house `number` (1-12).
pub fn house_name(number: u8, language: Language) -> &'static str {
    let idx = (number.clamp(1, 12) - 1) as usize;
    match language {
        Language::English => HOUSE_NAMES_EN[idx],
        Language::Arabic => HOUSE_NAMES_AR[idx],
    }
}

pub fn body_name(body: Body, language: Language) -> &'static str {
    match language {
        Language::English => match body {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
        },
        Language::Arabic => match body {
            Body::Sun => "الشمس",
            Body::Moon => "القمر",
            Body::Mercury => "عطارد",
            Body::Venus => "الزهرة",
            Body::Mars => "المريخ",
            Body::Jupiter => "المشتري",
            Body::Saturn => "زحل",
            Body::Uranus => "أورانوس",
            Body::Neptune => "نبتون",
            Body::Pluto => "بلوتو",
            Body::Rahu => "الرأس (راهو)",
            Body::Ketu => "الذنب (كيتو)",
        },
    }
}

pub fn body_glyph(body: Body) -> &'static str {
    match body {
        Body::Sun => "☉",
        Body::Moon => "☽",
        Body::Mercury => "☿",
        Body::Venus => "♀",
        Body::Mars => "♂",
        Body::Jupiter => "♃",
        Body::Saturn => "♄",
        Body::Uranus => "♅",
        Body::Neptune => "♆",
        Body::Pluto => "♇",
        Body::Rahu => "☊",
        Body::Ketu => "☋",
    }
}

/// Chart angle labels, keyed by the short code ("AC", "IC", "MC", "DC").
pub fn angle_name(code: &str, language: Language) -> &'static str {
    match (code, language) {
        ("AC", Language::English) => "Ascendant",
        ("IC", Language::English) => "Imum Coeli",
        ("MC", Language::English) => "Midheaven",
        ("DC", Language::English) => "Descendant",
        ("AC", Language::Arabic) => "الطالع",
        ("IC", Language::Arabic) => "قاع السماء",
        ("MC", Language::Arabic) => "وسط السماء",
        ("DC", Language::Arabic) => "الهابط",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("ar".parse::<Language>(), Ok(Language::Arabic));
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_sign_tables_line_up() {
        assert_eq!(sign_name(0, Language::English), "Aries");
        assert_eq!(sign_name(11, Language::Arabic), "الحوت");
        assert_eq!(sign_glyph(4), "♌");
    }

    #[test]
    fn test_house_name_clamps() {
        assert_eq!(house_name(1, Language::English), "1st (Ascendant)");
        assert_eq!(house_name(10, Language::Arabic), "العاشر (وسط السماء)");
    }
}
