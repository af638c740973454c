use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Company Services",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Departments, employees and timecards per company",
        "endpoints": {
            "company": "DELETE /company?company",
            "department": "GET|POST|PUT|DELETE /department, GET /departments?company",
            "employee": "GET|POST|PUT|DELETE /employee, GET /employees?company",
            "timecard": "GET|POST|PUT|DELETE /timecard, GET /timecards?company&emp_id",
            "health": "GET /health",
        }
    }))
}

/// GET /health - storage connectivity
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    match state.repository.ping().await {
        Ok(()) => Ok(ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "storage": "ok"
        }))),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            Err(ApiError::storage_error("Storage unavailable"))
        }
    }
}
