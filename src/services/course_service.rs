use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::{Catalog, courses};
use crate::error::AppError;
use crate::models::{Course, ListQuery, NewCourseRequest, Page, UpdateCourseRequest};
use crate::services::required;

pub const COURSE_NOT_FOUND: &str = "Curso não encontrado";
pub const COURSE_NAME_TAKEN: &str = "Já existe um curso com este nome";

pub struct CourseService {
    db: SqlitePool,
    catalog: Catalog,
}

impl CourseService {
    pub fn new(db: SqlitePool, catalog: Catalog) -> Self {
        Self { db, catalog }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Course>, AppError> {
        let (items, total) = courses::fetch_courses(&self.db, self.catalog, query).await?;
        Ok(Page::new(items, total, query))
    }

    pub async fn get(&self, id: &str) -> Result<Course, AppError> {
        courses::find_course_by_id(&self.db, self.catalog, id)
            .await?
            .ok_or_else(|| AppError::NotFound(COURSE_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        req.validate()?;
        let name = required(req.name, "name")?.trim().to_string();
        self.ensure_name_free(&name, None).await?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: now,
            updated_at: now,
        };

        courses::insert_course(&self.db, self.catalog, &course).await?;
        info!(catalog = ?self.catalog, id = %course.id, "course created");
        Ok(course)
    }

    pub async fn update(&self, id: &str, req: UpdateCourseRequest) -> Result<Course, AppError> {
        req.validate()?;
        let mut current = self.get(id).await?;

        if let Some(name) = req.name {
            let name = name.trim().to_string();
            if name != current.name {
                self.ensure_name_free(&name, Some(id)).await?;
                current.name = name;
            }
        }
        current.updated_at = Utc::now();

        if !courses::update_course(&self.db, self.catalog, &current).await? {
            return Err(AppError::NotFound(COURSE_NOT_FOUND.to_string()));
        }
        info!(catalog = ?self.catalog, id = %current.id, "course updated");
        Ok(current)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if courses::delete_course(&self.db, self.catalog, id).await? {
            info!(catalog = ?self.catalog, id = %id, "course deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(COURSE_NOT_FOUND.to_string()))
        }
    }

    async fn ensure_name_free(&self, name: &str, except_id: Option<&str>) -> Result<(), AppError> {
        match courses::find_course_by_name(&self.db, self.catalog, name).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                warn!(catalog = ?self.catalog, name = %name, "rejected duplicate course name");
                Err(AppError::Conflict(COURSE_NAME_TAKEN.to_string()))
            }
            _ => Ok(()),
        }
    }
}
