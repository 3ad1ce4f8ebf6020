use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Dados inválidos")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Conflict(String),
}

/// One entry of the `erros` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "campo")]
    pub field: String,
    #[serde(rename = "mensagem")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub mensagem: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub erros: Vec<FieldError>,
}

impl AppError {
    /// Rewrites the field names of a validation error. Other variants pass through.
    pub fn rename_fields(self, rename: impl Fn(&str) -> String) -> Self {
        match self {
            AppError::Validation(fields) => AppError::Validation(
                fields
                    .into_iter()
                    .map(|f| FieldError {
                        field: rename(&f.field),
                        message: f.message,
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = match &e.message {
                        Some(m) => m.to_string(),
                        None => format!("Valor inválido ({})", e.code),
                    };
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!(
            "Corpo da requisição inválido: {}",
            rejection.body_text()
        ))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Parâmetros inválidos: {}", rejection.body_text()))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// Translates domain field names into the current surface's wire names.
/// Names already in wire form pass through.
pub fn wire_field(field: &str) -> String {
    match field {
        "zip_code" => "zipCode",
        "student_id" => "studentId",
        "course_id" => "courseId",
        "completion_date" => "completionDate",
        other => other,
    }
    .to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensagem, erros) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            AppError::Validation(fields) => {
                let fields = fields
                    .into_iter()
                    .map(|f| FieldError {
                        field: wire_field(&f.field),
                        message: f.message,
                    })
                    .collect();
                (StatusCode::BAD_REQUEST, "Dados inválidos".to_string(), fields)
            }
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                "Registro não encontrado".to_string(),
                Vec::new(),
            ),
            AppError::Database(e) if is_unique_violation(&e) => (
                StatusCode::CONFLICT,
                "Registro duplicado".to_string(),
                Vec::new(),
            ),
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse { mensagem, erros });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_maps_multi_word_names() {
        assert_eq!(wire_field("zip_code"), "zipCode");
        assert_eq!(wire_field("student_id"), "studentId");
        assert_eq!(wire_field("course_id"), "courseId");
        assert_eq!(wire_field("completion_date"), "completionDate");
        assert_eq!(wire_field("name"), "name");
        assert_eq!(wire_field("dataNascimento"), "dataNascimento");
    }

    #[test]
    fn rename_fields_only_touches_validation() {
        let err = AppError::Validation(vec![FieldError::new("name", "obrigatório")])
            .rename_fields(|f| format!("x_{f}"));
        match err {
            AppError::Validation(fields) => assert_eq!(fields[0].field, "x_name"),
            other => panic!("unexpected {other:?}"),
        }

        let err = AppError::NotFound("nope".into()).rename_fields(|f| f.to_uppercase());
        assert!(matches!(err, AppError::NotFound(m) if m == "nope"));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
