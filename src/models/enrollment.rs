use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::date;
use super::validation::validate_not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[serde(alias = "CONCLUIDO")]
    Completed,
    #[serde(alias = "EM_ANDAMENTO")]
    InProgress,
}

impl EnrollmentStatus {
    /// A completion date on or before `today` means the course is done.
    pub fn derive(completion_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match completion_date {
            Some(d) if d <= today => EnrollmentStatus::Completed,
            _ => EnrollmentStatus::InProgress,
        }
    }
}

/// Stored enrollment joined with the names of its student and course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub completion_date: Option<NaiveDate>,
    pub status: EnrollmentStatus,
    pub student_name: String,
    pub course_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollmentRequest {
    #[validate(required(message = "Campo obrigatório"), custom(function = "validate_not_blank"))]
    pub student_id: Option<String>,
    #[validate(required(message = "Campo obrigatório"), custom(function = "validate_not_blank"))]
    pub course_id: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_opt")]
    pub completion_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub student_id: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub course_id: Option<String>,
    /// `Some(None)` clears the date.
    #[serde(default, deserialize_with = "date::deserialize_patch")]
    pub completion_date: Option<Option<NaiveDate>>,
}

/// Extra filters for the enrollment listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentFilter {
    #[serde(default, alias = "alunoId")]
    pub student_id: Option<String>,
    #[serde(default, alias = "cursoId")]
    pub course_id: Option<String>,
    #[serde(default)]
    pub status: Option<EnrollmentStatus>,
}
