use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One work-day interval for an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Timecard {
    pub timecard_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub emp_id: i32,
}
