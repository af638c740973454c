use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Manager reference meaning "reports to nobody"
pub const NO_MANAGER: i32 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub emp_id: i32,
    pub emp_name: String,
    pub emp_no: String,
    pub hire_date: NaiveDate,
    pub job: String,
    pub salary: f64,
    pub dept_id: i32,
    pub mng_id: i32,
}

impl Employee {
    pub fn has_manager(&self) -> bool {
        self.mng_id != NO_MANAGER
    }
}
