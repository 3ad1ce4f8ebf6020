use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::extract::{AppJson, AppQuery};
use crate::db::Catalog;
use crate::error::AppError;
use crate::models::{ListQuery, NewStudentRequest, Page, Student, UpdateStudentRequest};
use crate::services::StudentService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

fn service(state: &AppState) -> StudentService {
    StudentService::new(state.db.clone(), Catalog::Current)
}

async fn list_students(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<Student>>, AppError> {
    Ok(Json(service(&state).list(&query).await?))
}

async fn create_student(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = service(&state).create(req).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(service(&state).get(&id).await?))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(service(&state).update(&id, req).await?))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
