use sqlx::SqlitePool;

use super::Catalog;
use crate::models::page::fold;
use crate::models::{Course, ListQuery};

pub async fn fetch_courses(
    db: &SqlitePool,
    catalog: Catalog,
    query: &ListQuery,
) -> Result<(Vec<Course>, i64), sqlx::Error> {
    let filter = "WHERE (?1 IS NULL OR name_folded LIKE ?1 ESCAPE '\\')";
    let pattern = query.pattern();

    let sql = format!(
        "SELECT id, name, created_at, updated_at FROM {} {filter} \
         ORDER BY name_folded, id LIMIT ?2 OFFSET ?3",
        catalog.courses()
    );
    let courses = sqlx::query_as::<_, Course>(&sql)
        .bind(&pattern)
        .bind(i64::from(query.limit()))
        .bind(query.offset())
        .fetch_all(db)
        .await?;

    let sql = format!("SELECT COUNT(*) FROM {} {filter}", catalog.courses());
    let total: i64 = sqlx::query_scalar(&sql)
        .bind(&pattern)
        .fetch_one(db)
        .await?;

    Ok((courses, total))
}

pub async fn find_course_by_id(
    db: &SqlitePool,
    catalog: Catalog,
    id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    let sql = format!(
        "SELECT id, name, created_at, updated_at FROM {} WHERE id = ?",
        catalog.courses()
    );
    sqlx::query_as::<_, Course>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_course_by_name(
    db: &SqlitePool,
    catalog: Catalog,
    name: &str,
) -> Result<Option<Course>, sqlx::Error> {
    let sql = format!(
        "SELECT id, name, created_at, updated_at FROM {} WHERE name = ?",
        catalog.courses()
    );
    sqlx::query_as::<_, Course>(&sql)
        .bind(name)
        .fetch_optional(db)
        .await
}

pub async fn insert_course(
    db: &SqlitePool,
    catalog: Catalog,
    course: &Course,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} (id, name, name_folded, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        catalog.courses()
    );
    sqlx::query(&sql)
        .bind(&course.id)
        .bind(&course.name)
        .bind(fold(&course.name))
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_course(
    db: &SqlitePool,
    catalog: Catalog,
    course: &Course,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET name = ?, name_folded = ?, updated_at = ? WHERE id = ?",
        catalog.courses()
    );
    let result = sqlx::query(&sql)
        .bind(&course.name)
        .bind(fold(&course.name))
        .bind(course.updated_at)
        .bind(&course.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_course(db: &SqlitePool, catalog: Catalog, id: &str) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", catalog.courses());
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::*;

    #[tokio::test]
    async fn test_insert_and_find_course() {
        let pool = setup_test_db().await;
        let c = course("Álgebra Linear");
        insert_course(&pool, Catalog::Current, &c).await.unwrap();

        let by_id = find_course_by_id(&pool, Catalog::Current, &c.id).await.unwrap();
        assert_eq!(by_id.map(|x| x.name), Some("Álgebra Linear".to_string()));

        let by_name = find_course_by_name(&pool, Catalog::Current, "Álgebra Linear")
            .await
            .unwrap();
        assert_eq!(by_name.map(|x| x.id), Some(c.id));

        assert!(
            find_course_by_name(&pool, Catalog::Legacy, "Álgebra Linear")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_search_is_unicode_case_insensitive() {
        let pool = setup_test_db().await;
        insert_course(&pool, Catalog::Current, &course("Álgebra Linear")).await.unwrap();
        insert_course(&pool, Catalog::Current, &course("Física")).await.unwrap();

        for q in ["álgebra", "ÁLGEBRA", "LINEAR"] {
            let query = ListQuery {
                q: Some(q.into()),
                ..Default::default()
            };
            let (page, total) = fetch_courses(&pool, Catalog::Current, &query).await.unwrap();
            assert_eq!(total, 1, "{q}");
            assert_eq!(page[0].name, "Álgebra Linear");
        }

        for q in ["%", "_"] {
            let query = ListQuery {
                q: Some(q.into()),
                ..Default::default()
            };
            let (_, total) = fetch_courses(&pool, Catalog::Current, &query).await.unwrap();
            assert_eq!(total, 0, "{q}");
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_course() {
        let pool = setup_test_db().await;
        let mut c = course("Química");
        insert_course(&pool, Catalog::Current, &c).await.unwrap();

        c.name = "Química Orgânica".to_string();
        assert!(update_course(&pool, Catalog::Current, &c).await.unwrap());

        let (all, total) = fetch_courses(&pool, Catalog::Current, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(all[0].name, "Química Orgânica");

        let query = ListQuery {
            q: Some("ORGÂNICA".into()),
            ..Default::default()
        };
        let (_, total) = fetch_courses(&pool, Catalog::Current, &query).await.unwrap();
        assert_eq!(total, 1);

        assert!(delete_course(&pool, Catalog::Current, &c.id).await.unwrap());
        assert!(find_course_by_id(&pool, Catalog::Current, &c.id).await.unwrap().is_none());
    }
}
