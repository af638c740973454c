use serde::Serialize;

use crate::database::models::Timecard;
use crate::validation::temporal::BusinessCalendar;

/// Public wire format of a timecard: instants on the business clock as
/// `YYYY-MM-DD HH:MM:SS`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimecardView {
    pub timecard_id: i32,
    pub start_time: String,
    pub end_time: String,
    pub emp_id: i32,
}

impl TimecardView {
    pub fn new(timecard: &Timecard, calendar: &BusinessCalendar) -> Self {
        Self {
            timecard_id: timecard.timecard_id,
            start_time: calendar.format_local(&timecard.start_time),
            end_time: calendar.format_local(&timecard.end_time),
            emp_id: timecard.emp_id,
        }
    }

    pub fn many(timecards: &[Timecard], calendar: &BusinessCalendar) -> Vec<Self> {
        timecards.iter().map(|t| Self::new(t, calendar)).collect()
    }
}
