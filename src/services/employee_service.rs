use crate::api::EmployeeParams;
use crate::database::models::Employee;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::fields::supplied;
use crate::validation::EmployeeValidator;

pub struct EmployeeService<'a> {
    state: &'a AppState,
}

impl<'a> EmployeeService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn validator(&self) -> EmployeeValidator<'_> {
        EmployeeValidator::new(
            self.state.repository.as_ref(),
            &self.state.calendar,
            self.state.clock.as_ref(),
        )
    }

    pub async fn get(&self, params: &EmployeeParams) -> Result<Employee, ApiError> {
        let emp_id = EmployeeValidator::validate_lookup(params)?;
        self.find(emp_id).await
    }

    pub async fn list(&self, params: &EmployeeParams) -> Result<Vec<Employee>, ApiError> {
        let company = supplied(&params.company).ok_or_else(|| ApiError::missing_field("Company name is required"))?;
        let employees = self.state.repository.get_all_employees(company).await?;
        if employees.is_empty() {
            return Err(ApiError::not_found("No employees found"));
        }
        Ok(employees)
    }

    pub async fn create(&self, params: &EmployeeParams) -> Result<Employee, ApiError> {
        let employee = self.validator().validate_create(params).await?;
        let stored = self
            .state
            .repository
            .insert_employee(employee)
            .await
            .map_err(unique_emp_no)?;

        tracing::info!(emp_id = stored.emp_id, dept_id = stored.dept_id, "employee created");
        Ok(stored)
    }

    pub async fn update(&self, params: &EmployeeParams) -> Result<Employee, ApiError> {
        let employee = self.validator().validate_update(params).await?;
        let stored = self
            .state
            .repository
            .update_employee(employee)
            .await
            .map_err(unique_emp_no)?
            .ok_or_else(|| ApiError::not_found("Employee not found"))?;

        tracing::info!(emp_id = stored.emp_id, "employee updated");
        Ok(stored)
    }

    pub async fn delete(&self, params: &EmployeeParams) -> Result<String, ApiError> {
        let emp_id = EmployeeValidator::validate_lookup(params)?;
        self.find(emp_id).await?;
        self.state.repository.delete_employee(emp_id).await?;

        tracing::info!(emp_id, "employee deleted");
        Ok(format!("Employee {} deleted.", emp_id))
    }

    async fn find(&self, emp_id: i32) -> Result<Employee, ApiError> {
        self.state
            .repository
            .get_employee(emp_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Employee not found"))
    }
}

fn unique_emp_no(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::DuplicateKey(_) => ApiError::duplicate_key("Employee number must be unique"),
        other => other.into(),
    }
}
