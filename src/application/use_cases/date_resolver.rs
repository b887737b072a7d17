// ============================================================
// DATE RESOLVER
// ============================================================
// Publish time (serial day or ISO-8601 text) -> wall-clock time in the reporting zone

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike};

use crate::domain::error::{AppError, Result};
use crate::domain::video::{PublishTime, VideoRecord};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Roughly +/-30,000 years; anything beyond is not a real publish date
const MAX_SERIAL_MILLIS: f64 = 1.0e15;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub struct DateResolver {
    offset: FixedOffset,
}

impl DateResolver {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Resolve for one date-keyed aggregation; failures are logged and the record skipped
    pub fn resolve_or_skip(&self, record: &VideoRecord, aggregation: &str) -> Option<NaiveDateTime> {
        match self.resolve(&record.publish_time) {
            Ok(resolved) => Some(resolved),
            Err(err) => {
                tracing::warn!(
                    aggregation,
                    video_id = %record.video_id,
                    error = %err,
                    "Skipping record with unresolvable publish time"
                );
                None
            }
        }
    }

    pub fn resolve(&self, publish_time: &PublishTime) -> Result<NaiveDateTime> {
        match publish_time {
            PublishTime::Serial(days) => Self::resolve_serial(*days),
            PublishTime::Text(text) => self.resolve_text(text),
        }
    }

    /// Serial day 0 is 1899-12-30T00:00:00; fractions are time of day
    fn resolve_serial(days: f64) -> Result<NaiveDateTime> {
        let millis = (days * MILLIS_PER_DAY).round();
        if !millis.is_finite() || millis.abs() > MAX_SERIAL_MILLIS {
            return Err(AppError::DateResolutionFailure(format!(
                "serial day {} is out of range",
                days
            )));
        }

        serial_epoch()
            .and_then(|epoch| epoch.checked_add_signed(Duration::milliseconds(millis as i64)))
            .ok_or_else(|| {
                AppError::DateResolutionFailure(format!("serial day {} is out of range", days))
            })
    }

    fn resolve_text(&self, text: &str) -> Result<NaiveDateTime> {
        let normalized = normalize_iso(text);

        if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
            return Ok(parsed.with_timezone(&self.offset).naive_local());
        }
        for format in OFFSET_FORMATS {
            if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
                return Ok(parsed.with_timezone(&self.offset).naive_local());
            }
        }
        // No offset: already wall-clock time in the reporting zone
        for format in NAIVE_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, format) {
                return Ok(parsed);
            }
        }
        if let Some(midnight) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(midnight);
        }

        Err(AppError::DateResolutionFailure(format!(
            "unrecognized date {:?}",
            text
        )))
    }
}

fn serial_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Trim, accept a space as the date/time separator and `Z` as UTC
fn normalize_iso(text: &str) -> String {
    let mut normalized = text.trim().to_string();
    if normalized.len() > 10 && normalized.as_bytes()[10] == b' ' {
        normalized.replace_range(10..11, "T");
    }
    if normalized.ends_with('Z') || normalized.ends_with('z') {
        normalized.pop();
        normalized.push_str("+00:00");
    }
    normalized
}

/// `YYYY-MM`
pub fn month_key(at: &NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

/// `HH:00` of a time already resolved into the reporting zone
pub fn hour_label(at: &NaiveDateTime) -> String {
    format!("{:02}:00", at.hour())
}

/// `YYYY-ww`: calendar year, then the Sunday-start week number where week 1 contains 1 January.
/// Late-December days in next year's first week get week 01 of their own year,
/// so 2024-12-31 falls in `2024-01`.
pub fn week_key(at: &NaiveDateTime) -> String {
    let date = at.date();
    let year = date.year();

    let week_year = match NaiveDate::from_ymd_opt(year + 1, 1, 1) {
        Some(next_new_year) if date >= start_of_week(next_new_year) => year + 1,
        _ => year,
    };
    let week = NaiveDate::from_ymd_opt(week_year, 1, 1)
        .map(|new_year| (start_of_week(date) - start_of_week(new_year)).num_days() / 7 + 1)
        .unwrap_or(1);

    format!("{:04}-{:02}", year, week)
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> DateResolver {
        DateResolver::new(FixedOffset::east_opt(0).unwrap())
    }

    fn beijing() -> DateResolver {
        DateResolver::new(FixedOffset::east_opt(8 * 3600).unwrap())
    }

    fn text(value: &str) -> PublishTime {
        PublishTime::Text(value.to_string())
    }

    #[test]
    fn test_serial_day_uses_1899_epoch() {
        let resolved = utc().resolve(&PublishTime::Serial(0.0)).unwrap();
        assert_eq!(resolved.to_string(), "1899-12-30 00:00:00");

        let resolved = utc().resolve(&PublishTime::Serial(45000.0)).unwrap();
        assert_eq!(month_key(&resolved), "2023-03");
        assert_eq!(resolved.date(), NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    }

    #[test]
    fn test_serial_fraction_is_time_of_day() {
        let resolved = beijing().resolve(&PublishTime::Serial(45000.75)).unwrap();
        assert_eq!(hour_label(&resolved), "18:00");
    }

    #[test]
    fn test_serial_rejects_non_finite() {
        assert!(utc().resolve(&PublishTime::Serial(f64::NAN)).is_err());
        assert!(utc().resolve(&PublishTime::Serial(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_offset_timestamps_shift_to_reporting_zone() {
        let resolved = beijing().resolve(&text("2024-01-15T10:00:00Z")).unwrap();
        assert_eq!(hour_label(&resolved), "18:00");

        let resolved = beijing().resolve(&text("2024-01-31T20:00:00Z")).unwrap();
        assert_eq!(month_key(&resolved), "2024-02");

        let resolved = utc().resolve(&text("2024-01-15T10:00:00+08:00")).unwrap();
        assert_eq!(hour_label(&resolved), "02:00");
    }

    #[test]
    fn test_naive_timestamps_are_wall_clock() {
        let resolved = beijing().resolve(&text("2024-01-15 09:30:00")).unwrap();
        assert_eq!(hour_label(&resolved), "09:00");

        let resolved = beijing().resolve(&text("2024-01-15T21:05")).unwrap();
        assert_eq!(hour_label(&resolved), "21:00");

        let resolved = beijing().resolve(&text("2024-01-15T21:05:10.250")).unwrap();
        assert_eq!(resolved.second(), 10);
    }

    #[test]
    fn test_date_only_is_midnight() {
        let resolved = beijing().resolve(&text("2024-03-01")).unwrap();
        assert_eq!(month_key(&resolved), "2024-03");
        assert_eq!(hour_label(&resolved), "00:00");
    }

    #[test]
    fn test_garbage_fails() {
        let err = utc().resolve(&text("yesterday")).unwrap_err();
        assert!(matches!(err, AppError::DateResolutionFailure(_)));
        assert!(utc().resolve(&text("")).is_err());
        assert!(utc().resolve(&text("2024-13-45")).is_err());
    }

    #[test]
    fn test_week_key() {
        let at = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        // 2024-01-01 is a Monday; its week starts Sunday 2023-12-31
        assert_eq!(week_key(&at(2024, 1, 1)), "2024-01");
        assert_eq!(week_key(&at(2023, 12, 31)), "2023-01");
        assert_eq!(week_key(&at(2024, 1, 7)), "2024-02");
        assert_eq!(week_key(&at(2024, 12, 28)), "2024-52");
        assert_eq!(week_key(&at(2024, 12, 29)), "2024-01");
        assert_eq!(week_key(&at(2024, 12, 31)), "2024-01");
        assert_eq!(week_key(&at(2025, 1, 2)), "2025-01");
        assert_eq!(week_key(&at(2023, 6, 15)), "2023-24");
    }
}
