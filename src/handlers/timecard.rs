use axum::extract::State;

use crate::api::{Params, TimecardParams, TimecardView};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::TimecardService;
use crate::state::AppState;

/// GET /timecard?company&timecard_id
pub async fn get(State(state): State<AppState>, Params(params): Params<TimecardParams>) -> ApiResult<TimecardView> {
    let timecard = TimecardService::new(&state).get(&params).await?;
    Ok(ApiResponse::success(timecard))
}

/// GET /timecards?company&emp_id
pub async fn list(State(state): State<AppState>, Params(params): Params<TimecardParams>) -> ApiResult<Vec<TimecardView>> {
    let timecards = TimecardService::new(&state).list(&params).await?;
    Ok(ApiResponse::success(timecards))
}

/// POST /timecard
pub async fn post(State(state): State<AppState>, Params(params): Params<TimecardParams>) -> ApiResult<TimecardView> {
    let timecard = TimecardService::new(&state).create(&params).await?;
    Ok(ApiResponse::success(timecard))
}

/// PUT /timecard
pub async fn put(State(state): State<AppState>, Params(params): Params<TimecardParams>) -> ApiResult<TimecardView> {
    let timecard = TimecardService::new(&state).update(&params).await?;
    Ok(ApiResponse::success(timecard))
}

/// DELETE /timecard?company&timecard_id
pub async fn delete(State(state): State<AppState>, Params(params): Params<TimecardParams>) -> ApiResult<String> {
    let message = TimecardService::new(&state).delete(&params).await?;
    Ok(ApiResponse::success(message))
}
