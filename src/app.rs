use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{company, department, employee, system, timecard};
use crate::state::AppState;

/// Build the full router: resource routes under the configured base path,
/// banner and health check at the root.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let base_path = normalize_base_path(&config.server.base_path);

    let router = match base_path.as_deref() {
        Some(base) => Router::new().nest(base, resource_routes()),
        None => resource_routes(),
    };

    let mut router = router
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .with_state(state);

    if config.api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/company", delete(company::delete))
        .route(
            "/department",
            get(department::get)
                .post(department::post)
                .put(department::put)
                .delete(department::delete),
        )
        .route("/departments", get(department::list))
        .route(
            "/employee",
            get(employee::get)
                .post(employee::post)
                .put(employee::put)
                .delete(employee::delete),
        )
        .route("/employees", get(employee::list))
        .route(
            "/timecard",
            get(timecard::get)
                .post(timecard::post)
                .put(timecard::put)
                .delete(timecard::delete),
        )
        .route("/timecards", get(timecard::list))
}

/// `None` when routes belong at the root
fn normalize_base_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
