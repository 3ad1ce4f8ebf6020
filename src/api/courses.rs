use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::extract::{AppJson, AppQuery};
use crate::db::Catalog;
use crate::error::AppError;
use crate::models::{Course, ListQuery, NewCourseRequest, Page, UpdateCourseRequest};
use crate::services::CourseService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}

fn service(state: &AppState) -> CourseService {
    CourseService::new(state.db.clone(), Catalog::Current)
}

async fn list_courses(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<Course>>, AppError> {
    Ok(Json(service(&state).list(&query).await?))
}

async fn create_course(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = service(&state).create(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(service(&state).get(&id).await?))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(service(&state).update(&id, req).await?))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
