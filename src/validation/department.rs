use crate::api::DepartmentParams;
use crate::database::models::Department;
use crate::error::ApiError;

use super::fields::{parse_id, require_all, supplied};

/// Presence rules for departments. `dept_no` uniqueness is left to the
/// repository, which reports collisions as duplicate keys at write time.
pub struct DepartmentValidator;

impl DepartmentValidator {
    pub fn validate_create(params: &DepartmentParams) -> Result<Department, ApiError> {
        require_all(
            &[&params.company, &params.dept_name, &params.dept_no, &params.location],
            "All fields (company, dept_name, dept_no, location) are required.",
        )?;

        Ok(Department::new(
            field(&params.company),
            field(&params.dept_name),
            field(&params.dept_no),
            field(&params.location),
        ))
    }

    /// Updates replace the whole row: nothing is merged from the stored
    /// department, so name, number and location must all be sent again.
    pub fn validate_update(params: &DepartmentParams) -> Result<Department, ApiError> {
        let company = supplied(&params.company).ok_or_else(|| ApiError::missing_field("Company name is required"))?;
        let dept_id = supplied(&params.dept_id).ok_or_else(|| ApiError::missing_field("Department ID is required"))?;
        let dept_id = parse_id("dept_id", dept_id)?;

        require_all(
            &[&params.dept_name, &params.dept_no, &params.location],
            "All fields (dept_name, dept_no, location) are required to update a department",
        )?;

        Ok(Department {
            company: company.to_string(),
            dept_id,
            dept_name: field(&params.dept_name),
            dept_no: field(&params.dept_no),
            location: field(&params.location),
        })
    }

    /// `(company, dept_id)` for single-department reads
    pub fn validate_lookup(params: &DepartmentParams) -> Result<(String, i32), ApiError> {
        Self::company_and_id(params, "Both company name and department ID are required.")
    }

    /// `(company, dept_id)` for deletes
    pub fn validate_delete(params: &DepartmentParams) -> Result<(String, i32), ApiError> {
        Self::company_and_id(params, "Both company name and department ID are required")
    }

    fn company_and_id(params: &DepartmentParams, message: &str) -> Result<(String, i32), ApiError> {
        match (supplied(&params.company), supplied(&params.dept_id)) {
            (Some(company), Some(dept_id)) => Ok((company.to_string(), parse_id("dept_id", dept_id)?)),
            _ => Err(ApiError::missing_field(message)),
        }
    }
}

fn field(value: &Option<String>) -> String {
    supplied(value).unwrap_or_default().to_string()
}
