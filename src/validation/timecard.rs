use chrono::{DateTime, Utc};

use crate::api::TimecardParams;
use crate::database::models::Timecard;
use crate::database::repository::CompanyRepository;
use crate::error::ApiError;

use super::fields::{check_company, parse_id, require_all, supplied};
use super::temporal::{hours_between, BusinessCalendar};

/// Shortest shift that may be recorded, in hours
pub const MIN_SHIFT_HOURS: f64 = 1.0;

/// Timecard rules. Checks run in a fixed order and the first failure wins.
pub struct TimecardValidator<'a> {
    repository: &'a dyn CompanyRepository,
    calendar: &'a BusinessCalendar,
}

impl<'a> TimecardValidator<'a> {
    pub fn new(repository: &'a dyn CompanyRepository, calendar: &'a BusinessCalendar) -> Self {
        Self { repository, calendar }
    }

    /// Validate a new timecard. The returned record has `timecard_id == 0`.
    pub async fn validate_create(&self, params: &TimecardParams) -> Result<Timecard, ApiError> {
        require_all(
            &[&params.company, &params.emp_id, &params.start_time, &params.end_time],
            "All fields are required",
        )?;
        check_company(value(&params.company))?;

        let emp_id = parse_id("emp_id", value(&params.emp_id))?;
        if self.repository.get_employee(emp_id).await?.is_none() {
            return Err(ApiError::not_found("Employee does not exist"));
        }

        let (start, end) = match (
            self.calendar.parse_instant(value(&params.start_time)),
            self.calendar.parse_instant(value(&params.end_time)),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ApiError::invalid_date("Invalid date format")),
        };

        if !self.calendar.is_weekday(&start) {
            return Err(ApiError::invalid_time_window("Start time must be on a weekday"));
        }
        if !self.calendar.is_weekday(&end) {
            return Err(ApiError::invalid_time_window("End time must be on a weekday"));
        }
        if !self.calendar.is_valid_time_range(&start) || !self.calendar.is_valid_time_range(&end) {
            return Err(ApiError::invalid_time_window("Time must be between 08:00:00 and 18:00:00"));
        }
        self.check_shift(&start, &end)?;
        self.check_free_day(emp_id, &start).await?;

        Ok(Timecard {
            timecard_id: 0,
            start_time: start,
            end_time: end,
            emp_id,
        })
    }

    /// Validate an update, merging unsupplied fields from the stored timecard.
    ///
    /// The one-per-day rule and employee existence are not rechecked.
    pub async fn validate_update(&self, params: &TimecardParams) -> Result<Timecard, ApiError> {
        require_all(&[&params.company, &params.timecard_id], "Company and timecard ID are required")?;
        let timecard_id = parse_id("timecard_id", value(&params.timecard_id))?;

        let existing = self
            .repository
            .get_timecard(timecard_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Timecard not found"))?;

        let start = self.instant_or(&params.start_time, existing.start_time)?;
        let end = self.instant_or(&params.end_time, existing.end_time)?;

        if !self.calendar.is_weekday(&start) || !self.calendar.is_weekday(&end) {
            return Err(ApiError::invalid_time_window("Times must be on weekdays"));
        }
        if !self.calendar.is_valid_time_range(&start) || !self.calendar.is_valid_time_range(&end) {
            return Err(ApiError::invalid_time_window("Times must be between 08:00:00 and 18:00:00"));
        }
        self.check_shift(&start, &end)?;

        let emp_id = match supplied(&params.emp_id) {
            Some(raw) => parse_id("emp_id", raw)?,
            None => existing.emp_id,
        };

        Ok(Timecard {
            timecard_id,
            start_time: start,
            end_time: end,
            emp_id,
        })
    }

    /// `timecard_id` for reads and deletes
    pub fn validate_lookup(params: &TimecardParams) -> Result<i32, ApiError> {
        require_all(
            &[&params.company, &params.timecard_id],
            "Both company and timecard ID are required",
        )?;
        parse_id("timecard_id", value(&params.timecard_id))
    }

    /// `emp_id` for listing an employee's timecards
    pub fn validate_listing(params: &TimecardParams) -> Result<i32, ApiError> {
        require_all(
            &[&params.company, &params.emp_id],
            "Both company and employee ID are required",
        )?;
        parse_id("emp_id", value(&params.emp_id))
    }

    /// Minimum duration, then same calendar day
    fn check_shift(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<(), ApiError> {
        if hours_between(start, end) < MIN_SHIFT_HOURS {
            return Err(ApiError::invalid_time_window(
                "End time must be at least 1 hour after start time",
            ));
        }
        if !self.calendar.same_day(start, end) {
            return Err(ApiError::invalid_time_window(
                "Start time and end time must be on the same day",
            ));
        }
        Ok(())
    }

    /// Linear scan of the employee's timecards for one on the same date
    async fn check_free_day(&self, emp_id: i32, start: &DateTime<Utc>) -> Result<(), ApiError> {
        let day = self.calendar.local_date(start);
        let taken = self
            .repository
            .get_all_timecards(emp_id)
            .await?
            .iter()
            .any(|t| self.calendar.local_date(&t.start_time) == day);

        if taken {
            Err(ApiError::duplicate_key("Employee already has a timecard for this date"))
        } else {
            Ok(())
        }
    }

    fn instant_or(&self, raw: &Option<String>, fallback: DateTime<Utc>) -> Result<DateTime<Utc>, ApiError> {
        match supplied(raw) {
            Some(raw) => self
                .calendar
                .parse_instant(raw)
                .ok_or_else(|| ApiError::invalid_date("Invalid date format")),
            None => Ok(fallback),
        }
    }
}

fn value(field: &Option<String>) -> &str {
    supplied(field).unwrap_or_default()
}
