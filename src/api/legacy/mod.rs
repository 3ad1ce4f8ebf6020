//! Legacy Portuguese surface: `/alunos`, `/cursos`, `/matriculas`.
//! Same services as the current surface, bound to the legacy catalog.

pub mod dto;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use self::dto::{Aluno, AlunoPayload, Curso, CursoPayload, Matricula, MatriculaPayload, Pagina, campo};
use super::extract::{AppJson, AppQuery};
use crate::db::Catalog;
use crate::error::AppError;
use crate::models::{EnrollmentFilter, ListQuery};
use crate::services::{CourseService, EnrollmentService, StudentService};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/alunos", get(list_alunos).post(create_aluno))
        .route(
            "/alunos/{id}",
            get(get_aluno).put(update_aluno).delete(delete_aluno),
        )
        .route("/cursos", get(list_cursos).post(create_curso))
        .route(
            "/cursos/{id}",
            get(get_curso).put(update_curso).delete(delete_curso),
        )
        .route("/matriculas", get(list_matriculas).post(create_matricula))
        .route(
            "/matriculas/{id}",
            get(get_matricula)
                .put(update_matricula)
                .delete(delete_matricula),
        )
}

fn localize(err: AppError) -> AppError {
    err.rename_fields(campo)
}

// alunos

fn alunos(state: &AppState) -> StudentService {
    StudentService::new(state.db.clone(), Catalog::Legacy)
}

async fn list_alunos(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Pagina<Aluno>>, AppError> {
    let page = alunos(&state).list(&query).await?;
    Ok(Json(Pagina::from_page(page)))
}

async fn create_aluno(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AlunoPayload>,
) -> Result<(StatusCode, Json<Aluno>), AppError> {
    let student = alunos(&state).create(payload.into()).await.map_err(localize)?;
    Ok((StatusCode::CREATED, Json(student.into())))
}

async fn get_aluno(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Aluno>, AppError> {
    Ok(Json(alunos(&state).get(&id).await?.into()))
}

async fn update_aluno(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<AlunoPayload>,
) -> Result<Json<Aluno>, AppError> {
    let student = alunos(&state)
        .update(&id, payload.into())
        .await
        .map_err(localize)?;
    Ok(Json(student.into()))
}

async fn delete_aluno(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    alunos(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// cursos

fn cursos(state: &AppState) -> CourseService {
    CourseService::new(state.db.clone(), Catalog::Legacy)
}

async fn list_cursos(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Pagina<Curso>>, AppError> {
    let page = cursos(&state).list(&query).await?;
    Ok(Json(Pagina::from_page(page)))
}

async fn create_curso(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CursoPayload>,
) -> Result<(StatusCode, Json<Curso>), AppError> {
    let course = cursos(&state).create(payload.into()).await.map_err(localize)?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

async fn get_curso(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Curso>, AppError> {
    Ok(Json(cursos(&state).get(&id).await?.into()))
}

async fn update_curso(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CursoPayload>,
) -> Result<Json<Curso>, AppError> {
    let course = cursos(&state)
        .update(&id, payload.into())
        .await
        .map_err(localize)?;
    Ok(Json(course.into()))
}

async fn delete_curso(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    cursos(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// matriculas

fn matriculas(state: &AppState) -> EnrollmentService {
    EnrollmentService::new(state.db.clone(), Catalog::Legacy)
}

async fn list_matriculas(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
    AppQuery(filter): AppQuery<EnrollmentFilter>,
) -> Result<Json<Pagina<Matricula>>, AppError> {
    let page = matriculas(&state).list(&query, &filter).await?;
    Ok(Json(Pagina::from_page(page)))
}

async fn create_matricula(
    State(state): State<AppState>,
    AppJson(payload): AppJson<MatriculaPayload>,
) -> Result<(StatusCode, Json<Matricula>), AppError> {
    let enrollment = matriculas(&state)
        .create(payload.into())
        .await
        .map_err(localize)?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

async fn get_matricula(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Matricula>, AppError> {
    Ok(Json(matriculas(&state).get(&id).await?.into()))
}

async fn update_matricula(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MatriculaPayload>,
) -> Result<Json<Matricula>, AppError> {
    let enrollment = matriculas(&state)
        .update(&id, payload.into())
        .await
        .map_err(localize)?;
    Ok(Json(enrollment.into()))
}

async fn delete_matricula(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    matriculas(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
