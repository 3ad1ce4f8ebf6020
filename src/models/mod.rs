pub mod course;
pub mod date;
pub mod enrollment;
pub mod page;
pub mod student;
pub mod validation;

pub use course::{Course, NewCourseRequest, UpdateCourseRequest};
pub use enrollment::{
    Enrollment, EnrollmentFilter, EnrollmentStatus, NewEnrollmentRequest, UpdateEnrollmentRequest,
};
pub use page::{ListQuery, Page};
pub use student::{Gender, NewStudentRequest, Student, UpdateStudentRequest};
