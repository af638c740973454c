use crate::api::DepartmentParams;
use crate::database::models::Department;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::fields::supplied;
use crate::validation::DepartmentValidator;

pub struct DepartmentService<'a> {
    state: &'a AppState,
}

impl<'a> DepartmentService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn get(&self, params: &DepartmentParams) -> Result<Department, ApiError> {
        let (company, dept_id) = DepartmentValidator::validate_lookup(params)?;
        self.state
            .repository
            .get_department(&company, dept_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Department not found."))
    }

    pub async fn list(&self, params: &DepartmentParams) -> Result<Vec<Department>, ApiError> {
        let company = supplied(&params.company).ok_or_else(|| ApiError::missing_field("Company name is required."))?;
        let departments = self.state.repository.get_all_departments(company).await?;
        if departments.is_empty() {
            return Err(ApiError::not_found("No departments found."));
        }
        Ok(departments)
    }

    pub async fn create(&self, params: &DepartmentParams) -> Result<Department, ApiError> {
        let department = DepartmentValidator::validate_create(params)?;
        let stored = self
            .state
            .repository
            .insert_department(department)
            .await
            .map_err(unique_dept_no)?;

        tracing::info!(company = %stored.company, dept_id = stored.dept_id, "department created");
        Ok(stored)
    }

    pub async fn update(&self, params: &DepartmentParams) -> Result<Department, ApiError> {
        let department = DepartmentValidator::validate_update(params)?;
        let stored = self
            .state
            .repository
            .update_department(department)
            .await
            .map_err(unique_dept_no)?
            .ok_or_else(|| ApiError::not_found("Department not found"))?;

        tracing::info!(company = %stored.company, dept_id = stored.dept_id, "department updated");
        Ok(stored)
    }

    pub async fn delete(&self, params: &DepartmentParams) -> Result<String, ApiError> {
        let (company, dept_id) = DepartmentValidator::validate_delete(params)?;
        let removed = self.state.repository.delete_department(&company, dept_id).await?;
        if removed == 0 {
            return Err(ApiError::not_found("No matching department found to delete"));
        }

        tracing::info!(company = %company, dept_id, "department deleted");
        Ok(format!("Department {} from {} deleted.", dept_id, company))
    }
}

fn unique_dept_no(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::DuplicateKey(_) => ApiError::duplicate_key("Department number must be unique"),
        other => other.into(),
    }
}
