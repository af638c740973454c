use axum::extract::State;

use crate::api::{DepartmentParams, Params};
use crate::database::models::Department;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::DepartmentService;
use crate::state::AppState;

/// GET /department?company&dept_id
pub async fn get(State(state): State<AppState>, Params(params): Params<DepartmentParams>) -> ApiResult<Department> {
    let department = DepartmentService::new(&state).get(&params).await?;
    Ok(ApiResponse::success(department))
}

/// GET /departments?company
pub async fn list(State(state): State<AppState>, Params(params): Params<DepartmentParams>) -> ApiResult<Vec<Department>> {
    let departments = DepartmentService::new(&state).list(&params).await?;
    Ok(ApiResponse::success(departments))
}

/// POST /department
pub async fn post(State(state): State<AppState>, Params(params): Params<DepartmentParams>) -> ApiResult<Department> {
    let department = DepartmentService::new(&state).create(&params).await?;
    Ok(ApiResponse::success(department))
}

/// PUT /department
pub async fn put(State(state): State<AppState>, Params(params): Params<DepartmentParams>) -> ApiResult<Department> {
    let department = DepartmentService::new(&state).update(&params).await?;
    Ok(ApiResponse::success(department))
}

/// DELETE /department?company&dept_id
pub async fn delete(State(state): State<AppState>, Params(params): Params<DepartmentParams>) -> ApiResult<String> {
    let message = DepartmentService::new(&state).delete(&params).await?;
    Ok(ApiResponse::success(message))
}
