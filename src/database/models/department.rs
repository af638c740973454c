use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Organizational unit owned by a company. `dept_no` is unique across all departments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub company: String,
    pub dept_id: i32,
    pub dept_name: String,
    pub dept_no: String,
    pub location: String,
}

impl Department {
    /// A department that has not been stored yet (`dept_id` is assigned on insert)
    pub fn new(
        company: impl Into<String>,
        dept_name: impl Into<String>,
        dept_no: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            dept_id: 0,
            dept_name: dept_name.into(),
            dept_no: dept_no.into(),
            location: location.into(),
        }
    }
}
