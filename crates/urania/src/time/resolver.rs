//! Attach a concrete UTC offset to a civil birth time.

use crate::time::julian::julian_day;
use crate::zodiac::Language;
use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Unknown timezone: {timezone}")]
    UnknownTimezone { timezone: String },
    #[error("Local time {local} does not exist in {timezone} (clocks moved forward)")]
    NonexistentLocalTime { local: NaiveDateTime, timezone: String },
    #[error("Local time {local} occurs twice in {timezone}")]
    AmbiguousLocalTime { local: NaiveDateTime, timezone: String },
}

/// A civil time pinned to one UTC offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInstant {
    pub timezone: String,
    pub local: DateTime<FixedOffset>,
    pub utc: DateTime<Utc>,
    /// Julian day (UT) of `utc`
    pub julian_day: f64,
    /// Seconds the offset sits above the zone's standard offset for the year
    pub dst_offset_seconds: i64,
}

impl ResolvedInstant {
    pub fn utc_offset_seconds(&self) -> i32 {
        self.local.offset().local_minus_utc()
    }

    pub fn is_dst(&self) -> bool {
        self.dst_offset_seconds != 0
    }

    pub fn dst_hours(&self) -> f64 {
        self.dst_offset_seconds as f64 / 3600.0
    }
}

/// How the offset of a birth time was chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DstNotice {
    /// The wall-clock time happened twice; one occurrence was picked
    Ambiguous {
        local_time: String,
        chose_daylight: bool,
        utc_offset: String,
    },
    Daylight { utc_offset: String, dst_hours: f64 },
    Standard { utc_offset: String },
}

impl DstNotice {
    pub fn render(&self, language: Language) -> String {
        match (self, language) {
            (
                DstNotice::Ambiguous {
                    local_time,
                    chose_daylight,
                    utc_offset,
                },
                Language::English,
            ) => {
                let used = if *chose_daylight {
                    "daylight saving time (first occurrence)"
                } else {
                    "standard time (second occurrence)"
                };
                format!(
                    "Note: the entered time ({local_time}) occurs twice on this date because of daylight saving time. Used {used}. Offset used: {utc_offset}"
                )
            }
            (
                DstNotice::Ambiguous {
                    local_time,
                    chose_daylight,
                    utc_offset,
                },
                Language::Arabic,
            ) => {
                let used = if *chose_daylight {
                    "التوقيت الصيفي (الحدوث الأول)"
                } else {
                    "التوقيت الشتوي (الحدوث الثاني)"
                };
                format!(
                    "ملاحظة: الوقت المدخل ({local_time}) يحدث مرتين في هذا التاريخ بسبب التوقيت الصيفي. تم استخدام {used}. التوقيت المستخدم: {utc_offset}"
                )
            }
            (DstNotice::Daylight { utc_offset, dst_hours }, Language::English) => format!(
                "✓ Daylight saving time is active on this date. Offset used: {utc_offset} (includes +{} hour DST)",
                format_hours(*dst_hours)
            ),
            (DstNotice::Daylight { utc_offset, dst_hours }, Language::Arabic) => format!(
                "✓ التوقيت الصيفي نشط في هذا التاريخ. التوقيت المستخدم: {utc_offset} (يتضمن +{} ساعة توقيت صيفي)",
                format_hours(*dst_hours)
            ),
            (DstNotice::Standard { utc_offset }, Language::English) => {
                format!("Standard time is active on this date. Offset used: {utc_offset}")
            }
            (DstNotice::Standard { utc_offset }, Language::Arabic) => {
                format!("التوقيت الشتوي (القياسي) نشط في هذا التاريخ. التوقيت المستخدم: {utc_offset}")
            }
        }
    }
}

/// "1", "0.5", "1.5": one decimal, trailing zeros dropped.
fn format_hours(hours: f64) -> String {
    let text = format!("{:.1}", hours);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format an offset in seconds as `UTC+HH:MM`.
pub fn format_utc_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

fn parse_timezone(timezone: &str) -> Result<Tz, TimeError> {
    timezone
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone {
            timezone: timezone.to_string(),
        })
}

/// The zone's standard offset in `year`: the lower of its midwinter and
/// midsummer offsets. Zones whose rules put the negative shift in winter
/// (Europe/Dublin) still get their summer offset reported as daylight time.
fn standard_offset_seconds(tz: Tz, year: i32) -> Option<i32> {
    [(1, 1), (7, 1)]
        .iter()
        .filter_map(|&(month, day)| {
            let noon = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(12, 0, 0)?;
            Some(tz.offset_from_utc_datetime(&noon).fix().local_minus_utc())
        })
        .min()
}

fn pin(timezone: &str, dt: DateTime<Tz>) -> ResolvedInstant {
    let offset = dt.offset().fix();
    let standard = standard_offset_seconds(dt.timezone(), dt.year())
        .unwrap_or_else(|| offset.local_minus_utc());
    let dst = (offset.local_minus_utc() - standard).max(0) as i64;
    let local = dt.with_timezone(&offset);
    let utc = dt.with_timezone(&Utc);
    ResolvedInstant {
        timezone: timezone.to_string(),
        local,
        utc,
        julian_day: julian_day(utc),
        dst_offset_seconds: dst,
    }
}

/// Resolve a civil time in `timezone` to one instant.
///
/// Repeated wall-clock times take the earlier instant when `prefer_dst` is
/// set and the later one otherwise. Skipped times are an error.
pub fn resolve_local_time(
    naive: NaiveDateTime,
    timezone: &str,
    prefer_dst: bool,
) -> Result<(ResolvedInstant, DstNotice), TimeError> {
    let tz = parse_timezone(timezone)?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => {
            let resolved = pin(timezone, dt);
            let utc_offset = format_utc_offset(resolved.utc_offset_seconds());
            let notice = if resolved.is_dst() {
                DstNotice::Daylight {
                    utc_offset,
                    dst_hours: resolved.dst_hours(),
                }
            } else {
                DstNotice::Standard { utc_offset }
            };
            Ok((resolved, notice))
        }
        LocalResult::Ambiguous(a, b) => {
            let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
            let chosen = if prefer_dst { earlier } else { later };
            let resolved = pin(timezone, chosen);
            log::info!(
                "Ambiguous time detected for {}, using DST={}",
                timezone,
                prefer_dst
            );
            let notice = DstNotice::Ambiguous {
                local_time: naive.format("%H:%M").to_string(),
                chose_daylight: prefer_dst,
                utc_offset: format_utc_offset(resolved.utc_offset_seconds()),
            };
            Ok((resolved, notice))
        }
        LocalResult::None => {
            log::warn!(
                "Non-existent time for {} at {}",
                timezone,
                naive.format("%Y-%m-%d %H:%M")
            );
            Err(TimeError::NonexistentLocalTime {
                local: naive,
                timezone: timezone.to_string(),
            })
        }
    }
}

/// Offset facts for a timezone at a civil time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub timezone: String,
    pub datetime: String,
    pub utc_offset_hours: f64,
}

/// Strict lookup of the offset in force at a civil time; both repeated and
/// skipped wall-clock times are errors here.
pub fn timezone_info(timezone: &str, naive: NaiveDateTime) -> Result<TimezoneInfo, TimeError> {
    let tz = parse_timezone(timezone)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(TimezoneInfo {
            timezone: timezone.to_string(),
            datetime: dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            utc_offset_hours: dt.offset().fix().local_minus_utc() as f64 / 3600.0,
        }),
        LocalResult::Ambiguous(..) => Err(TimeError::AmbiguousLocalTime {
            local: naive,
            timezone: timezone.to_string(),
        }),
        LocalResult::None => Err(TimeError::NonexistentLocalTime {
            local: naive,
            timezone: timezone.to_string(),
        }),
    }
}
