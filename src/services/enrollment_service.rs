use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::enrollments::{self, EnrollmentRecord};
use crate::db::{Catalog, courses, students};
use crate::error::AppError;
use crate::models::{
    Enrollment, EnrollmentFilter, EnrollmentStatus, ListQuery, NewEnrollmentRequest, Page,
    UpdateEnrollmentRequest,
};
use crate::services::course_service::COURSE_NOT_FOUND;
use crate::services::required;
use crate::services::student_service::STUDENT_NOT_FOUND;

pub const ENROLLMENT_NOT_FOUND: &str = "Matrícula não encontrada";
pub const ALREADY_ENROLLED: &str = "Aluno já matriculado neste curso";

pub struct EnrollmentService {
    db: SqlitePool,
    catalog: Catalog,
    today: NaiveDate,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool, catalog: Catalog) -> Self {
        Self::with_today(db, catalog, Utc::now().date_naive())
    }

    /// Fixes the date the status rule compares against.
    pub fn with_today(db: SqlitePool, catalog: Catalog, today: NaiveDate) -> Self {
        Self { db, catalog, today }
    }

    pub async fn list(
        &self,
        query: &ListQuery,
        filter: &EnrollmentFilter,
    ) -> Result<Page<Enrollment>, AppError> {
        let (items, total) =
            enrollments::fetch_enrollments(&self.db, self.catalog, query, filter).await?;
        Ok(Page::new(items, total, query))
    }

    pub async fn get(&self, id: &str) -> Result<Enrollment, AppError> {
        enrollments::find_enrollment_by_id(&self.db, self.catalog, id)
            .await?
            .ok_or_else(|| AppError::NotFound(ENROLLMENT_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, req: NewEnrollmentRequest) -> Result<Enrollment, AppError> {
        req.validate()?;
        let student_id = required(req.student_id, "student_id")?.trim().to_string();
        let course_id = required(req.course_id, "course_id")?.trim().to_string();

        self.ensure_references(&student_id, &course_id).await?;
        self.ensure_not_enrolled(&student_id, &course_id, None).await?;

        let now = Utc::now();
        let record = EnrollmentRecord {
            id: Uuid::new_v4().to_string(),
            student_id,
            course_id,
            completion_date: req.completion_date,
            status: EnrollmentStatus::derive(req.completion_date, self.today),
            created_at: now,
            updated_at: now,
        };

        enrollments::insert_enrollment(&self.db, self.catalog, &record).await?;
        info!(
            catalog = ?self.catalog,
            id = %record.id,
            status = ?record.status,
            "enrollment created"
        );
        self.get(&record.id).await
    }

    pub async fn update(&self, id: &str, req: UpdateEnrollmentRequest) -> Result<Enrollment, AppError> {
        req.validate()?;
        let mut record = EnrollmentRecord::from(self.get(id).await?);

        let student_id = req.student_id.map(|s| s.trim().to_string());
        let course_id = req.course_id.map(|c| c.trim().to_string());
        let pair_changed = student_id.as_ref().is_some_and(|s| *s != record.student_id)
            || course_id.as_ref().is_some_and(|c| *c != record.course_id);

        if let Some(student_id) = student_id {
            record.student_id = student_id;
        }
        if let Some(course_id) = course_id {
            record.course_id = course_id;
        }
        if pair_changed {
            self.ensure_references(&record.student_id, &record.course_id).await?;
            self.ensure_not_enrolled(&record.student_id, &record.course_id, Some(id))
                .await?;
        }

        // Status is only re-derived when the completion date is part of the update.
        if let Some(completion_date) = req.completion_date {
            record.completion_date = completion_date;
            record.status = EnrollmentStatus::derive(completion_date, self.today);
        }
        record.updated_at = Utc::now();

        if !enrollments::update_enrollment(&self.db, self.catalog, &record).await? {
            return Err(AppError::NotFound(ENROLLMENT_NOT_FOUND.to_string()));
        }
        info!(
            catalog = ?self.catalog,
            id = %record.id,
            status = ?record.status,
            "enrollment updated"
        );
        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if enrollments::delete_enrollment(&self.db, self.catalog, id).await? {
            info!(catalog = ?self.catalog, id = %id, "enrollment deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(ENROLLMENT_NOT_FOUND.to_string()))
        }
    }

    async fn ensure_references(&self, student_id: &str, course_id: &str) -> Result<(), AppError> {
        if students::find_student_by_id(&self.db, self.catalog, student_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(STUDENT_NOT_FOUND.to_string()));
        }
        if courses::find_course_by_id(&self.db, self.catalog, course_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(COURSE_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn ensure_not_enrolled(
        &self,
        student_id: &str,
        course_id: &str,
        except_id: Option<&str>,
    ) -> Result<(), AppError> {
        match enrollments::find_enrollment_id_by_pair(&self.db, self.catalog, student_id, course_id)
            .await?
        {
            Some(existing) if Some(existing.as_str()) != except_id => {
                warn!(
                    catalog = ?self.catalog,
                    student_id = %student_id,
                    course_id = %course_id,
                    "rejected duplicate enrollment"
                );
                Err(AppError::Conflict(ALREADY_ENROLLED.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn fixture() -> (SqlitePool, String, String) {
        let db = setup_test_db().await;
        let s = student("Maria Silva", "52998224725");
        let c = course("Direito");
        seed_student(&db, Catalog::Current, &s).await;
        seed_course(&db, Catalog::Current, &c).await;
        (db, s.id, c.id)
    }

    fn new_request(student_id: &str, course_id: &str, date: Option<NaiveDate>) -> NewEnrollmentRequest {
        NewEnrollmentRequest {
            student_id: Some(student_id.to_string()),
            course_id: Some(course_id.to_string()),
            completion_date: date,
        }
    }

    #[tokio::test]
    async fn status_is_derived_against_today() {
        let (db, s, c) = fixture().await;
        let service = EnrollmentService::with_today(db, Catalog::Current, day(2025, 3, 1));

        let e = service
            .create(new_request(&s, &c, Some(day(2025, 3, 1))))
            .await
            .unwrap();
        assert_eq!(e.status, EnrollmentStatus::Completed);
        assert_eq!(e.student_name, "Maria Silva");
        assert_eq!(e.course_name, "Direito");

        let e = service
            .update(
                &e.id,
                UpdateEnrollmentRequest {
                    completion_date: Some(Some(day(2025, 3, 2))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(e.status, EnrollmentStatus::InProgress);

        let e = service
            .update(
                &e.id,
                UpdateEnrollmentRequest {
                    completion_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(e.status, EnrollmentStatus::InProgress);
        assert_eq!(e.completion_date, None);
    }

    #[tokio::test]
    async fn status_is_not_recomputed_without_a_date_change() {
        let (db, s, c) = fixture().await;
        let earlier = EnrollmentService::with_today(db.clone(), Catalog::Current, day(2025, 1, 1));
        let e = earlier
            .create(new_request(&s, &c, Some(day(2025, 6, 1))))
            .await
            .unwrap();
        assert_eq!(e.status, EnrollmentStatus::InProgress);

        // Time passes; a read or an unrelated update leaves the stored status alone.
        let later = EnrollmentService::with_today(db, Catalog::Current, day(2025, 7, 1));
        assert_eq!(later.get(&e.id).await.unwrap().status, EnrollmentStatus::InProgress);
        let e = later
            .update(&e.id, UpdateEnrollmentRequest::default())
            .await
            .unwrap();
        assert_eq!(e.status, EnrollmentStatus::InProgress);
    }

    #[tokio::test]
    async fn duplicate_enrollment_conflicts() {
        let (db, s, c) = fixture().await;
        let service = EnrollmentService::new(db, Catalog::Current);
        service.create(new_request(&s, &c, None)).await.unwrap();
        let err = service.create(new_request(&s, &c, None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_references_are_not_found() {
        let (db, s, c) = fixture().await;
        let service = EnrollmentService::new(db, Catalog::Current);

        let err = service.create(new_request("nobody", &c, None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == STUDENT_NOT_FOUND));

        let err = service.create(new_request(&s, "nothing", None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == COURSE_NOT_FOUND));
    }

    #[tokio::test]
    async fn moving_to_a_taken_pair_conflicts() {
        let (db, s, c) = fixture().await;
        let other = course("Medicina");
        seed_course(&db, Catalog::Current, &other).await;

        let service = EnrollmentService::new(db, Catalog::Current);
        service.create(new_request(&s, &c, None)).await.unwrap();
        let second = service.create(new_request(&s, &other.id, None)).await.unwrap();

        let err = service
            .update(
                &second.id,
                UpdateEnrollmentRequest {
                    course_id: Some(c.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn references_are_scoped_to_the_catalog() {
        let (db, s, c) = fixture().await;
        let legacy = EnrollmentService::new(db, Catalog::Legacy);
        let err = legacy.create(new_request(&s, &c, None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
