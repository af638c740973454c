use axum::extract::State;

use crate::api::{CompanyParams, Params};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CompanyService;
use crate::state::AppState;

/// DELETE /company?company
pub async fn delete(State(state): State<AppState>, Params(params): Params<CompanyParams>) -> ApiResult<String> {
    let message = CompanyService::new(&state).delete(&params).await?;
    Ok(ApiResponse::success(message))
}
