//! Errors surfaced at the boundary of a chart request.

use crate::houses::HouseError;
use crate::rendering::RenderError;
use crate::time::TimeError;
use crate::zodiac::Language;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },
    #[error("No timezone found for {location}")]
    TimezoneNotFound { location: String },
    #[error("Local time {local} does not exist on {date} in {timezone}")]
    NonexistentLocalTime {
        local: String,
        date: String,
        timezone: String,
    },
    #[error("Computation failed: {message}")]
    ComputationFailure { message: String },
}

impl ChartError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        ChartError::ComputationFailure {
            message: message.into(),
        }
    }

    /// Text suitable for showing to the person who submitted the request.
    pub fn user_message(&self, language: Language) -> String {
        match (self, language) {
            (ChartError::InvalidInput { field, message }, Language::English) => {
                format!("Invalid value for {field}: {message}")
            }
            (ChartError::InvalidInput { field, message }, Language::Arabic) => {
                format!("قيمة غير صالحة في الحقل {field}: {message}")
            }
            (ChartError::LocationNotFound { .. }, Language::English) => {
                "We could not find the city/country entered. Check the spelling.".to_string()
            }
            (ChartError::LocationNotFound { .. }, Language::Arabic) => {
                "لم نتمكن من العثور على المدينة/الدولة المدخلة. تحقق من الإملاء.".to_string()
            }
            (ChartError::TimezoneNotFound { .. }, Language::English) => {
                "No timezone was found for this location.".to_string()
            }
            (ChartError::TimezoneNotFound { .. }, Language::Arabic) => {
                "لم يتم العثور على منطقة زمنية لهذا الموقع.".to_string()
            }
            (ChartError::NonexistentLocalTime { local, date, .. }, Language::English) => format!(
                "The entered time ({local}) does not exist on {date} because of daylight saving time: the clocks moved forward that day. Please enter a different time."
            ),
            (ChartError::NonexistentLocalTime { local, .. }, Language::Arabic) => format!(
                "الوقت المدخل ({local}) غير موجود في هذا التاريخ بسبب التوقيت الصيفي. الساعة تقدمت في هذا اليوم. يرجى إدخال وقت مختلف."
            ),
            (ChartError::ComputationFailure { message }, Language::English) => {
                format!("An unexpected error occurred: {message}")
            }
            (ChartError::ComputationFailure { message }, Language::Arabic) => {
                format!("حدث خطأ غير متوقع: {message}")
            }
        }
    }
}

impl From<TimeError> for ChartError {
    fn from(err: TimeError) -> Self {
        match err {
            TimeError::UnknownTimezone { timezone } => ChartError::TimezoneNotFound { location: timezone },
            TimeError::NonexistentLocalTime { local, timezone } => ChartError::NonexistentLocalTime {
                local: local.format("%H:%M").to_string(),
                date: local.format("%Y-%m-%d").to_string(),
                timezone,
            },
            other => ChartError::computation(other.to_string()),
        }
    }
}

impl From<HouseError> for ChartError {
    fn from(err: HouseError) -> Self {
        ChartError::computation(err.to_string())
    }
}

impl From<RenderError> for ChartError {
    fn from(err: RenderError) -> Self {
        ChartError::computation(err.to_string())
    }
}
