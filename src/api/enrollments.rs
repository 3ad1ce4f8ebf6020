use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::extract::{AppJson, AppQuery};
use crate::db::Catalog;
use crate::error::AppError;
use crate::models::{
    Enrollment, EnrollmentFilter, ListQuery, NewEnrollmentRequest, Page, UpdateEnrollmentRequest,
};
use crate::services::EnrollmentService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", get(list_enrollments).post(create_enrollment))
        .route(
            "/enrollments/{id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
}

fn service(state: &AppState) -> EnrollmentService {
    EnrollmentService::new(state.db.clone(), Catalog::Current)
}

async fn list_enrollments(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
    AppQuery(filter): AppQuery<EnrollmentFilter>,
) -> Result<Json<Page<Enrollment>>, AppError> {
    Ok(Json(service(&state).list(&query, &filter).await?))
}

async fn create_enrollment(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewEnrollmentRequest>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = service(&state).create(req).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Enrollment>, AppError> {
    Ok(Json(service(&state).get(&id).await?))
}

async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateEnrollmentRequest>,
) -> Result<Json<Enrollment>, AppError> {
    Ok(Json(service(&state).update(&id, req).await?))
}

async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
