pub mod courses;
pub mod enrollments;
pub mod extract;
pub mod legacy;
pub mod students;

use axum::http::{HeaderValue, StatusCode, header::InvalidHeaderValue};
use axum::{Router, extract::State, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(students::routes())
        .merge(courses::routes())
        .merge(enrollments::routes())
        .merge(legacy::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive when no origin is configured, otherwise restricted to it.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = match origin {
        Some(origin) => CorsLayer::new().allow_origin(HeaderValue::from_str(origin)?),
        None => CorsLayer::new().allow_origin(Any),
    };
    Ok(layer.allow_methods(Any).allow_headers(Any))
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
