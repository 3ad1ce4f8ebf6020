use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::validation::validate_course_name;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewCourseRequest {
    #[validate(
        required(message = "Campo obrigatório"),
        custom(function = "validate_course_name")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(custom(function = "validate_course_name"))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required_and_not_blank() {
        assert!(NewCourseRequest::default().validate().is_err());
        assert!(
            NewCourseRequest {
                name: Some("   ".into())
            }
            .validate()
            .is_err()
        );
        assert!(
            NewCourseRequest {
                name: Some("Cálculo I".into())
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let padded = format!("   {}   ", "x".repeat(120));
        assert!(NewCourseRequest { name: Some(padded) }.validate().is_ok());
        let too_long = "x".repeat(121);
        assert!(NewCourseRequest { name: Some(too_long) }.validate().is_err());
    }

    #[test]
    fn update_without_name_is_valid() {
        assert!(UpdateCourseRequest::default().validate().is_ok());
    }
}
