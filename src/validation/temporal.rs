//! Temporal predicates used by the employee and timecard rules.
//!
//! The zone each predicate evaluates in is an explicit argument. The
//! service has historically judged weekdays on the UTC calendar and
//! business hours on the local clock; [`BusinessCalendar`] carries both
//! zones so that split is configured rather than hardcoded.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// First hour of the business day (inclusive)
pub const BUSINESS_OPEN_HOUR: u32 = 8;
/// Last hour of the business day (inclusive, so 18:59 still passes)
pub const BUSINESS_CLOSE_HOUR: u32 = 18;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// True iff the instant falls Monday through Friday on `zone`'s calendar.
pub fn is_weekday<Z: TimeZone>(instant: &DateTime<Utc>, zone: &Z) -> bool {
    !matches!(instant.with_timezone(zone).weekday(), Weekday::Sat | Weekday::Sun)
}

/// True iff the hour-of-day on `zone`'s clock lies in [8, 18].
pub fn is_valid_time_range<Z: TimeZone>(instant: &DateTime<Utc>, zone: &Z) -> bool {
    let hour = instant.with_timezone(zone).hour();
    (BUSINESS_OPEN_HOUR..=BUSINESS_CLOSE_HOUR).contains(&hour)
}

/// Real-valued number of hours from `start` to `end` (negative if reversed).
pub fn hours_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    (*end - *start).num_milliseconds() as f64 / 3_600_000.0
}

/// Zones the predicates are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    weekday_zone: Tz,
    business_zone: Tz,
}

impl BusinessCalendar {
    pub fn new(weekday_zone: Tz, business_zone: Tz) -> Self {
        Self {
            weekday_zone,
            business_zone,
        }
    }

    /// Both predicates in one zone
    pub fn unified(zone: Tz) -> Self {
        Self::new(zone, zone)
    }

    pub fn weekday_zone(&self) -> Tz {
        self.weekday_zone
    }

    pub fn business_zone(&self) -> Tz {
        self.business_zone
    }

    pub fn is_weekday(&self, instant: &DateTime<Utc>) -> bool {
        is_weekday(instant, &self.weekday_zone)
    }

    pub fn is_valid_time_range(&self, instant: &DateTime<Utc>) -> bool {
        is_valid_time_range(instant, &self.business_zone)
    }

    /// Calendar date of the instant on the business clock
    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.business_zone).date_naive()
    }

    /// Compares year, month and day on the business clock
    pub fn same_day(&self, a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
        self.local_date(a) == self.local_date(b)
    }

    /// Render an instant on the business clock as `YYYY-MM-DD HH:MM:SS`
    pub fn format_local(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.business_zone)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// Parse a client-supplied date or date-time.
    ///
    /// RFC 3339 strings keep their offset, naive date-times are read on the
    /// business clock, and a bare `YYYY-MM-DD` is UTC midnight.
    pub fn parse_instant(&self, raw: &str) -> Option<DateTime<Utc>> {
        self.parse_written(raw).map(|(instant, _)| instant)
    }

    /// Like [`parse_instant`](Self::parse_instant), also returning the
    /// calendar date as the client wrote it: the naive date when no offset
    /// was given, otherwise the date in the input's own offset.
    pub fn parse_written(&self, raw: &str) -> Option<(DateTime<Utc>, NaiveDate)> {
        let raw = raw.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some((instant.with_timezone(&Utc), instant.date_naive()));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                let instant = match self.business_zone.from_local_datetime(&naive) {
                    LocalResult::Single(local) => local.with_timezone(&Utc),
                    LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
                    LocalResult::None => return None,
                };
                return Some((instant, naive.date()));
            }
        }

        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Some((Utc.from_utc_datetime(&midnight), date))
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::new(Tz::UTC, chrono_tz::America::New_York)
    }
}
