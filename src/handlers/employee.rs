use axum::extract::State;

use crate::api::{EmployeeParams, Params};
use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::EmployeeService;
use crate::state::AppState;

/// GET /employee?company&emp_id
pub async fn get(State(state): State<AppState>, Params(params): Params<EmployeeParams>) -> ApiResult<Employee> {
    let employee = EmployeeService::new(&state).get(&params).await?;
    Ok(ApiResponse::success(employee))
}

/// GET /employees?company
pub async fn list(State(state): State<AppState>, Params(params): Params<EmployeeParams>) -> ApiResult<Vec<Employee>> {
    let employees = EmployeeService::new(&state).list(&params).await?;
    Ok(ApiResponse::success(employees))
}

/// POST /employee
pub async fn post(State(state): State<AppState>, Params(params): Params<EmployeeParams>) -> ApiResult<Employee> {
    let employee = EmployeeService::new(&state).create(&params).await?;
    Ok(ApiResponse::success(employee))
}

/// PUT /employee
pub async fn put(State(state): State<AppState>, Params(params): Params<EmployeeParams>) -> ApiResult<Employee> {
    let employee = EmployeeService::new(&state).update(&params).await?;
    Ok(ApiResponse::success(employee))
}

/// DELETE /employee?company&emp_id
pub async fn delete(State(state): State<AppState>, Params(params): Params<EmployeeParams>) -> ApiResult<String> {
    let message = EmployeeService::new(&state).delete(&params).await?;
    Ok(ApiResponse::success(message))
}
