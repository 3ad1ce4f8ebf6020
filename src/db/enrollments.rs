use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use super::Catalog;
use crate::models::{Enrollment, EnrollmentFilter, EnrollmentStatus, ListQuery};

/// Row written to the enrollments table; names are joined in on read.
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub completion_date: Option<NaiveDate>,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentRecord {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id,
            student_id: e.student_id,
            course_id: e.course_id,
            completion_date: e.completion_date,
            status: e.status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

fn select_joined(catalog: Catalog) -> String {
    format!(
        "SELECT e.id, e.student_id, e.course_id, e.completion_date, e.status, \
                s.name AS student_name, c.name AS course_name, e.created_at, e.updated_at \
         FROM {} e \
         JOIN {} s ON s.id = e.student_id \
         JOIN {} c ON c.id = e.course_id",
        catalog.enrollments(),
        catalog.students(),
        catalog.courses()
    )
}

pub async fn fetch_enrollments(
    db: &SqlitePool,
    catalog: Catalog,
    query: &ListQuery,
    filter: &EnrollmentFilter,
) -> Result<(Vec<Enrollment>, i64), sqlx::Error> {
    let predicate = "WHERE (?1 IS NULL OR s.name_folded LIKE ?1 ESCAPE '\\' \
                            OR c.name_folded LIKE ?1 ESCAPE '\\') \
                     AND (?2 IS NULL OR e.student_id = ?2) \
                     AND (?3 IS NULL OR e.course_id = ?3) \
                     AND (?4 IS NULL OR e.status = ?4)";
    let pattern = query.pattern();

    let sql = format!(
        "{} {predicate} ORDER BY e.created_at DESC, e.id LIMIT ?5 OFFSET ?6",
        select_joined(catalog)
    );
    let enrollments = sqlx::query_as::<_, Enrollment>(&sql)
        .bind(&pattern)
        .bind(&filter.student_id)
        .bind(&filter.course_id)
        .bind(filter.status)
        .bind(i64::from(query.limit()))
        .bind(query.offset())
        .fetch_all(db)
        .await?;

    let sql = format!(
        "SELECT COUNT(*) FROM {} e \
         JOIN {} s ON s.id = e.student_id \
         JOIN {} c ON c.id = e.course_id {predicate}",
        catalog.enrollments(),
        catalog.students(),
        catalog.courses()
    );
    let total: i64 = sqlx::query_scalar(&sql)
        .bind(&pattern)
        .bind(&filter.student_id)
        .bind(&filter.course_id)
        .bind(filter.status)
        .fetch_one(db)
        .await?;

    Ok((enrollments, total))
}

pub async fn find_enrollment_by_id(
    db: &SqlitePool,
    catalog: Catalog,
    id: &str,
) -> Result<Option<Enrollment>, sqlx::Error> {
    let sql = format!("{} WHERE e.id = ?", select_joined(catalog));
    sqlx::query_as::<_, Enrollment>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// The id of the enrollment linking this student to this course, if any.
pub async fn find_enrollment_id_by_pair(
    db: &SqlitePool,
    catalog: Catalog,
    student_id: &str,
    course_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    let sql = format!(
        "SELECT id FROM {} WHERE student_id = ? AND course_id = ?",
        catalog.enrollments()
    );
    sqlx::query_scalar(&sql)
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
}

pub async fn insert_enrollment(
    db: &SqlitePool,
    catalog: Catalog,
    record: &EnrollmentRecord,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (id, student_id, course_id, completion_date, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        catalog.enrollments()
    );
    sqlx::query(&sql)
        .bind(&record.id)
        .bind(&record.student_id)
        .bind(&record.course_id)
        .bind(record.completion_date)
        .bind(record.status)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_enrollment(
    db: &SqlitePool,
    catalog: Catalog,
    record: &EnrollmentRecord,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET student_id = ?, course_id = ?, completion_date = ?, status = ?, updated_at = ? \
         WHERE id = ?",
        catalog.enrollments()
    );
    let result = sqlx::query(&sql)
        .bind(&record.student_id)
        .bind(&record.course_id)
        .bind(record.completion_date)
        .bind(record.status)
        .bind(record.updated_at)
        .bind(&record.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_enrollment(db: &SqlitePool, catalog: Catalog, id: &str) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", catalog.enrollments());
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
