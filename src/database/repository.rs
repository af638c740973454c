use async_trait::async_trait;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::{Department, Employee, Timecard};

/// Storage operations the validators and services depend on.
///
/// Inserts ignore the id on the incoming record and return the stored row
/// with its assigned id. Inserts and updates of departments and employees
/// fail with [`DatabaseError::DuplicateKey`] when `dept_no` / `emp_no`
/// collides with another row.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Cheap connectivity probe for `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn get_department(&self, company: &str, dept_id: i32) -> Result<Option<Department>, DatabaseError>;
    async fn get_all_departments(&self, company: &str) -> Result<Vec<Department>, DatabaseError>;
    async fn insert_department(&self, department: Department) -> Result<Department, DatabaseError>;
    /// `None` when no department matches `(company, dept_id)`
    async fn update_department(&self, department: Department) -> Result<Option<Department>, DatabaseError>;
    /// Number of rows removed
    async fn delete_department(&self, company: &str, dept_id: i32) -> Result<u64, DatabaseError>;
    /// Removes every department of the company with their employees and timecards
    async fn delete_company(&self, company: &str) -> Result<(), DatabaseError>;

    async fn get_employee(&self, emp_id: i32) -> Result<Option<Employee>, DatabaseError>;
    /// Employees whose department belongs to the company
    async fn get_all_employees(&self, company: &str) -> Result<Vec<Employee>, DatabaseError>;
    async fn insert_employee(&self, employee: Employee) -> Result<Employee, DatabaseError>;
    async fn update_employee(&self, employee: Employee) -> Result<Option<Employee>, DatabaseError>;
    async fn delete_employee(&self, emp_id: i32) -> Result<(), DatabaseError>;

    async fn get_timecard(&self, timecard_id: i32) -> Result<Option<Timecard>, DatabaseError>;
    async fn get_all_timecards(&self, emp_id: i32) -> Result<Vec<Timecard>, DatabaseError>;
    async fn insert_timecard(&self, timecard: Timecard) -> Result<Timecard, DatabaseError>;
    async fn update_timecard(&self, timecard: Timecard) -> Result<Option<Timecard>, DatabaseError>;
    async fn delete_timecard(&self, timecard_id: i32) -> Result<(), DatabaseError>;
}

pub type SharedRepository = Arc<dyn CompanyRepository>;
