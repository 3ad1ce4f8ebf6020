use sqlx::SqlitePool;

use super::Catalog;
use crate::models::page::fold;
use crate::models::{ListQuery, Student};

const COLUMNS: &str = "id, name, birthdate, cpf, gender, email, street, number, complement, \
                       neighborhood, city, state, zip_code, created_at, updated_at";

/// One page of students ordered by name, plus the total matching the search.
pub async fn fetch_students(
    db: &SqlitePool,
    catalog: Catalog,
    query: &ListQuery,
) -> Result<(Vec<Student>, i64), sqlx::Error> {
    let filter = "WHERE (?1 IS NULL OR name_folded LIKE ?1 ESCAPE '\\' \
                  OR email LIKE ?1 ESCAPE '\\' OR cpf LIKE ?2)";
    let pattern = query.pattern();
    let cpf_pattern = query.digits_pattern();

    let sql = format!(
        "SELECT {COLUMNS} FROM {} {filter} ORDER BY name_folded, id LIMIT ?3 OFFSET ?4",
        catalog.students()
    );
    let students = sqlx::query_as::<_, Student>(&sql)
        .bind(&pattern)
        .bind(&cpf_pattern)
        .bind(i64::from(query.limit()))
        .bind(query.offset())
        .fetch_all(db)
        .await?;

    let sql = format!("SELECT COUNT(*) FROM {} {filter}", catalog.students());
    let total: i64 = sqlx::query_scalar(&sql)
        .bind(&pattern)
        .bind(&cpf_pattern)
        .fetch_one(db)
        .await?;

    Ok((students, total))
}

pub async fn find_student_by_id(
    db: &SqlitePool,
    catalog: Catalog,
    id: &str,
) -> Result<Option<Student>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = ?", catalog.students());
    sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_student_by_cpf(
    db: &SqlitePool,
    catalog: Catalog,
    cpf: &str,
) -> Result<Option<Student>, sqlx::Error> {
    let sql = format!("SELECT {COLUMNS} FROM {} WHERE cpf = ?", catalog.students());
    sqlx::query_as::<_, Student>(&sql)
        .bind(cpf)
        .fetch_optional(db)
        .await
}

pub async fn insert_student(
    db: &SqlitePool,
    catalog: Catalog,
    student: &Student,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} ({COLUMNS}, name_folded) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        catalog.students()
    );
    sqlx::query(&sql)
        .bind(&student.id)
        .bind(&student.name)
        .bind(student.birthdate)
        .bind(&student.cpf)
        .bind(student.gender)
        .bind(&student.email)
        .bind(&student.street)
        .bind(&student.number)
        .bind(&student.complement)
        .bind(&student.neighborhood)
        .bind(&student.city)
        .bind(&student.state)
        .bind(&student.zip_code)
        .bind(student.created_at)
        .bind(student.updated_at)
        .bind(fold(&student.name))
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_student(
    db: &SqlitePool,
    catalog: Catalog,
    student: &Student,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET name = ?, name_folded = ?, birthdate = ?, cpf = ?, gender = ?, email = ?, \
         street = ?, number = ?, complement = ?, neighborhood = ?, city = ?, state = ?, zip_code = ?, \
         updated_at = ? WHERE id = ?",
        catalog.students()
    );
    let result = sqlx::query(&sql)
        .bind(&student.name)
        .bind(fold(&student.name))
        .bind(student.birthdate)
        .bind(&student.cpf)
        .bind(student.gender)
        .bind(&student.email)
        .bind(&student.street)
        .bind(&student.number)
        .bind(&student.complement)
        .bind(&student.neighborhood)
        .bind(&student.city)
        .bind(&student.state)
        .bind(&student.zip_code)
        .bind(student.updated_at)
        .bind(&student.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_student(db: &SqlitePool, catalog: Catalog, id: &str) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", catalog.students());
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
