pub mod course_service;
pub mod enrollment_service;
pub mod student_service;

pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use student_service::StudentService;

use crate::error::{AppError, FieldError};

/// Unwraps a field that `#[validate(required)]` has already checked.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(vec![FieldError::new(field, "Campo obrigatório")]))
}
