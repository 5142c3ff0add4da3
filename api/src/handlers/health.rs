// Health check endpoint handler implementation

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::handlers::AppState;
use crate::services::health::HealthChecker;

/// Handler for GET /health - Returns a simple health check response to verify the API is running
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let health_checker = HealthChecker::new(&state.pool);
    if health_checker.check() {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
    }
}

/// Handler for GET /ready - OK once the database is reachable
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let health_checker = HealthChecker::new(&state.pool);
    if health_checker.check_ready().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
    }
}
