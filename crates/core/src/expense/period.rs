//! Date-range resolution for period filters.
//!
//! A period token selects a closed `[start, end]` window of UTC instants:
//!
//! | token     | start          | end       |
//! |-----------|----------------|-----------|
//! | `week`    | now - 7 days   | now       |
//! | `month`   | now - 30 days  | now       |
//! | `3months` | now - 90 days  | now       |
//! | `custom`  | `startDate`    | `endDate` |
//!
//! Any other token, an empty token, or no token means "no date filter".
//! Named periods use fixed-day arithmetic and read the clock when resolved, so
//! two resolutions a moment apart produce slightly different windows.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Errors produced while resolving a `custom` period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    /// `startDate` or `endDate` is absent or empty.
    #[error("Start date and end date are required for custom period")]
    MissingBounds,

    /// A bound is not a recognizable date-time.
    #[error("Invalid date format")]
    InvalidDate,

    /// `startDate` is after `endDate`.
    #[error("Start date must be before end date")]
    Inverted,
}

/// Named or custom time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// Last 90 days.
    ThreeMonths,
    /// Caller-supplied bounds.
    Custom,
}

impl Period {
    /// Parses a period token. Unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "3months" => Some(Self::ThreeMonths),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Length of a named period in whole days; `None` for `Custom`.
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::ThreeMonths => Some(90),
            Self::Custom => None,
        }
    }
}

/// Closed interval of instants; both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest instant included.
    pub start: DateTime<Utc>,
    /// Latest instant included.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Returns true if `instant` lies within the range.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Raw period parameters as they arrive on a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodParams {
    /// Period token.
    pub period: Option<String>,
    /// Start bound for `custom`.
    pub start_date: Option<String>,
    /// End bound for `custom`.
    pub end_date: Option<String>,
}

impl PeriodParams {
    /// Resolves against the current clock.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRangeError` for a malformed `custom` period.
    pub fn resolve(&self) -> Result<Option<DateRange>, InvalidRangeError> {
        self.resolve_at(Utc::now())
    }

    /// Resolves with `now` as the end of named periods.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRangeError` for a malformed `custom` period.
    pub fn resolve_at(&self, now: DateTime<Utc>) -> Result<Option<DateRange>, InvalidRangeError> {
        resolve_date_range_at(
            self.period.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            now,
        )
    }
}

/// Resolves a period token, using `now` as the end of named periods.
///
/// Returns `Ok(None)` when no filtering applies.
///
/// # Errors
///
/// For `custom` only:
/// - `MissingBounds` if either bound is absent or empty
/// - `InvalidDate` if either bound fails to parse
/// - `Inverted` if the start is after the end
pub fn resolve_date_range_at(
    period: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<DateRange>, InvalidRangeError> {
    let Some(period) = period.and_then(Period::from_token) else {
        return Ok(None);
    };

    if let Some(days) = period.days() {
        return Ok(Some(DateRange {
            start: now - Duration::days(days),
            end: now,
        }));
    }

    let (Some(start), Some(end)) = (non_empty(start_date), non_empty(end_date)) else {
        return Err(InvalidRangeError::MissingBounds);
    };

    let (Some(start), Some(end)) = (parse_date_time(start), parse_date_time(end)) else {
        return Err(InvalidRangeError::InvalidDate);
    };

    if start > end {
        return Err(InvalidRangeError::Inverted);
    }

    Ok(Some(DateRange { start, end }))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parses an ISO 8601 date or date-time into UTC.
///
/// Accepts RFC 3339 (`2024-03-01T09:30:00Z`, `2024-03-01T09:30:00+02:00`),
/// a date-time without offset (`2024-03-01T09:30:00`, read as UTC), and a
/// bare date (`2024-03-01`, UTC midnight).
#[must_use]
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use rstest::rstest;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case("week", 7)]
    #[case("month", 30)]
    #[case("3months", 90)]
    fn test_named_periods_end_now(#[case] token: &str, #[case] days: i64) {
        let now = fixed_now();
        let range = resolve_date_range_at(Some(token), None, None, now)
            .unwrap()
            .unwrap();

        assert_eq!(range.end, now);
        assert_eq!(range.end - range.start, Duration::days(days));
    }

    #[test]
    fn test_named_period_ignores_custom_bounds() {
        let now = fixed_now();
        let range = resolve_date_range_at(Some("week"), Some("garbage"), None, now)
            .unwrap()
            .unwrap();

        assert_eq!(range.start, now - Duration::days(7));
    }

    #[test]
    fn test_month_is_thirty_days_not_calendar_month() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let range = resolve_date_range_at(Some("month"), None, None, now)
            .unwrap()
            .unwrap();

        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 1, 30, 0, 0, 0).unwrap());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("year"))]
    #[case(Some("Week"))]
    fn test_unfiltered(#[case] token: Option<&str>) {
        assert_eq!(resolve_date_range_at(token, None, None, fixed_now()), Ok(None));
    }

    #[test]
    fn test_custom_range() {
        let range = resolve_date_range_at(
            Some("custom"),
            Some("2026-01-01"),
            Some("2026-01-31T23:59:59Z"),
            fixed_now(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_custom_single_instant_is_allowed() {
        let range = resolve_date_range_at(
            Some("custom"),
            Some("2026-02-02"),
            Some("2026-02-02"),
            fixed_now(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(range.start, range.end);
    }

    #[rstest]
    #[case(None, Some("2026-01-31"))]
    #[case(Some("2026-01-01"), None)]
    #[case(None, None)]
    #[case(Some(""), Some("2026-01-31"))]
    fn test_custom_missing_bounds(#[case] start: Option<&str>, #[case] end: Option<&str>) {
        assert_eq!(
            resolve_date_range_at(Some("custom"), start, end, fixed_now()),
            Err(InvalidRangeError::MissingBounds)
        );
    }

    #[rstest]
    #[case("yesterday", "2026-01-31")]
    #[case("2026-01-01", "2026-13-01")]
    #[case("2026-02-30", "2026-03-01")]
    fn test_custom_unparseable(#[case] start: &str, #[case] end: &str) {
        assert_eq!(
            resolve_date_range_at(Some("custom"), Some(start), Some(end), fixed_now()),
            Err(InvalidRangeError::InvalidDate)
        );
    }

    #[test]
    fn test_custom_inverted() {
        assert_eq!(
            resolve_date_range_at(
                Some("custom"),
                Some("2026-02-01"),
                Some("2026-01-01"),
                fixed_now()
            ),
            Err(InvalidRangeError::Inverted)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InvalidRangeError::MissingBounds.to_string(),
            "Start date and end date are required for custom period"
        );
        assert_eq!(InvalidRangeError::InvalidDate.to_string(), "Invalid date format");
        assert_eq!(
            InvalidRangeError::Inverted.to_string(),
            "Start date must be before end date"
        );
    }

    #[rstest]
    #[case("2026-03-01T09:30:00Z", (2026, 3, 1, 9, 30, 0))]
    #[case("2026-03-01T09:30:00+02:00", (2026, 3, 1, 7, 30, 0))]
    #[case("2026-03-01T09:30:00.250Z", (2026, 3, 1, 9, 30, 0))]
    #[case("2026-03-01T09:30:00", (2026, 3, 1, 9, 30, 0))]
    #[case("2026-03-01T09:30", (2026, 3, 1, 9, 30, 0))]
    #[case("2026-03-01", (2026, 3, 1, 0, 0, 0))]
    fn test_parse_date_time(#[case] raw: &str, #[case] expected: (i32, u32, u32, u32, u32, u32)) {
        let (y, mo, d, h, mi, s) = expected;
        let parsed = parse_date_time(raw).unwrap();
        assert_eq!(
            parsed.with_nanosecond(0).unwrap(),
            Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
        );
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = DateRange {
            start: fixed_now() - Duration::days(1),
            end: fixed_now(),
        };

        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.contains(range.end + Duration::seconds(1)));
    }

    #[test]
    fn test_period_params_resolve_uses_clock() {
        let params = PeriodParams {
            period: Some("week".to_string()),
            ..PeriodParams::default()
        };
        let before = Utc::now();
        let range = params.resolve().unwrap().unwrap();
        let after = Utc::now();

        assert!(before <= range.end && range.end <= after);
        assert_eq!(range.end - range.start, Duration::days(7));
    }
}
