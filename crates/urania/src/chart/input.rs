use crate::error::ChartError;
use crate::houses::HouseSystem;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Place name as entered, used for labels and timezone corrections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub country: String,
}

impl Place {
    pub fn label(&self) -> String {
        format!("{}, {}", self.city.trim(), self.country.trim())
    }
}

/// Birth data with location and timezone already resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier
    pub timezone: String,
    pub house_system: HouseSystem,
    /// For repeated wall-clock times: take the first (daylight) occurrence
    pub prefer_dst: bool,
    #[serde(default)]
    pub place: Option<Place>,
}

impl BirthInput {
    /// Check every field and build the naive civil datetime.
    pub fn validate(&self) -> Result<NaiveDateTime, ChartError> {
        if !(1..=12).contains(&self.month) {
            return Err(ChartError::invalid("month", format!("{} is not in 1..=12", self.month)));
        }
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ChartError::invalid(
                "day",
                format!("{:04}-{:02}-{:02} is not a calendar date", self.year, self.month, self.day),
            )
        })?;
        if self.hour > 23 {
            return Err(ChartError::invalid("hour", format!("{} is not in 0..=23", self.hour)));
        }
        if self.minute > 59 {
            return Err(ChartError::invalid("minute", format!("{} is not in 0..=59", self.minute)));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ChartError::invalid("latitude", format!("{} is not in [-90, 90]", self.latitude)));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ChartError::invalid(
                "longitude",
                format!("{} is not in [-180, 180]", self.longitude),
            ));
        }
        if self.timezone.trim().is_empty() {
            return Err(ChartError::TimezoneNotFound {
                location: format!("{}, {}", self.latitude, self.longitude),
            });
        }

        date.and_hms_opt(self.hour, self.minute, 0)
            .ok_or_else(|| ChartError::invalid("hour", "invalid time of day"))
    }
}

/// Parse a house-system selector ("P", "W", "placidus", ...) from a form field.
pub fn parse_house_system(selector: &str) -> Result<HouseSystem, ChartError> {
    selector.parse::<HouseSystem>().map_err(|_| {
        ChartError::invalid(
            "house_system",
            format!(
                "{selector:?} is not one of {}",
                HouseSystem::valid_selectors().join(", ")
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> BirthInput {
        BirthInput {
            year: 1990,
            month: 6,
            day: 15,
            hour: 14,
            minute: 30,
            latitude: 52.52,
            longitude: 13.405,
            timezone: "Europe/Berlin".to_string(),
            house_system: HouseSystem::Placidus,
            prefer_dst: true,
            place: None,
        }
    }

    #[test]
    fn test_valid_input() {
        let naive = input().validate().unwrap();
        assert_eq!(naive.format("%Y-%m-%d %H:%M").to_string(), "1990-06-15 14:30");
    }

    #[test]
    fn test_rejects_bad_fields() {
        let cases: Vec<(BirthInput, &str)> = vec![
            (BirthInput { month: 13, ..input() }, "month"),
            (BirthInput { day: 31, ..input() }, "day"),
            (BirthInput { hour: 24, ..input() }, "hour"),
            (BirthInput { minute: 60, ..input() }, "minute"),
            (BirthInput { latitude: 91.0, ..input() }, "latitude"),
            (BirthInput { longitude: -180.5, ..input() }, "longitude"),
        ];
        for (case, expected) in cases {
            match case.validate() {
                Err(ChartError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_timezone() {
        let case = BirthInput {
            timezone: " ".to_string(),
            ..input()
        };
        assert!(matches!(case.validate(), Err(ChartError::TimezoneNotFound { .. })));
    }

    #[test]
    fn test_parse_house_system_selector() {
        assert_eq!(parse_house_system("W").unwrap(), HouseSystem::WholeSign);
        assert!(matches!(
            parse_house_system("X"),
            Err(ChartError::InvalidInput { field: "house_system", .. })
        ));
    }
}
