use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::{Catalog, students};
use crate::error::AppError;
use crate::services::required;
use crate::models::validation::{digits, non_blank};
use crate::models::{ListQuery, NewStudentRequest, Page, Student, UpdateStudentRequest};

pub const STUDENT_NOT_FOUND: &str = "Aluno não encontrado";
pub const CPF_TAKEN: &str = "CPF já cadastrado";

pub struct StudentService {
    db: SqlitePool,
    catalog: Catalog,
}

impl StudentService {
    pub fn new(db: SqlitePool, catalog: Catalog) -> Self {
        Self { db, catalog }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Student>, AppError> {
        let (items, total) = students::fetch_students(&self.db, self.catalog, query).await?;
        Ok(Page::new(items, total, query))
    }

    pub async fn get(&self, id: &str) -> Result<Student, AppError> {
        students::find_student_by_id(&self.db, self.catalog, id)
            .await?
            .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, req: NewStudentRequest) -> Result<Student, AppError> {
        req.validate()?;

        let cpf = digits(&required(req.cpf, "cpf")?);
        self.ensure_cpf_free(&cpf, None).await?;

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4().to_string(),
            name: required(req.name, "name")?.trim().to_string(),
            birthdate: required(req.birthdate, "birthdate")?,
            cpf,
            gender: required(req.gender, "gender")?,
            email: required(req.email, "email")?.trim().to_lowercase(),
            street: non_blank(req.street),
            number: non_blank(req.number),
            complement: non_blank(req.complement),
            neighborhood: non_blank(req.neighborhood),
            city: non_blank(req.city),
            state: non_blank(req.state).map(|s| s.to_uppercase()),
            zip_code: non_blank(req.zip_code).map(|z| digits(&z)),
            created_at: now,
            updated_at: now,
        };

        students::insert_student(&self.db, self.catalog, &student).await?;
        info!(catalog = ?self.catalog, id = %student.id, "student created");
        Ok(student)
    }

    pub async fn update(&self, id: &str, req: UpdateStudentRequest) -> Result<Student, AppError> {
        req.validate()?;
        let mut current = self.get(id).await?;

        if let Some(name) = req.name {
            current.name = name.trim().to_string();
        }
        if let Some(birthdate) = req.birthdate {
            current.birthdate = birthdate;
        }
        if let Some(cpf) = req.cpf {
            let cpf = digits(&cpf);
            if cpf != current.cpf {
                self.ensure_cpf_free(&cpf, Some(id)).await?;
                current.cpf = cpf;
            }
        }
        if let Some(gender) = req.gender {
            current.gender = gender;
        }
        if let Some(email) = req.email {
            current.email = email.trim().to_lowercase();
        }
        if req.street.is_some() {
            current.street = non_blank(req.street);
        }
        if req.number.is_some() {
            current.number = non_blank(req.number);
        }
        if req.complement.is_some() {
            current.complement = non_blank(req.complement);
        }
        if req.neighborhood.is_some() {
            current.neighborhood = non_blank(req.neighborhood);
        }
        if req.city.is_some() {
            current.city = non_blank(req.city);
        }
        if req.state.is_some() {
            current.state = non_blank(req.state).map(|s| s.to_uppercase());
        }
        if req.zip_code.is_some() {
            current.zip_code = non_blank(req.zip_code).map(|z| digits(&z));
        }
        current.updated_at = Utc::now();

        if !students::update_student(&self.db, self.catalog, &current).await? {
            return Err(AppError::NotFound(STUDENT_NOT_FOUND.to_string()));
        }
        info!(catalog = ?self.catalog, id = %current.id, "student updated");
        Ok(current)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if students::delete_student(&self.db, self.catalog, id).await? {
            info!(catalog = ?self.catalog, id = %id, "student deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(STUDENT_NOT_FOUND.to_string()))
        }
    }

    async fn ensure_cpf_free(&self, cpf: &str, except_id: Option<&str>) -> Result<(), AppError> {
        match students::find_student_by_cpf(&self.db, self.catalog, cpf).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                warn!(catalog = ?self.catalog, "rejected duplicate cpf");
                Err(AppError::Conflict(CPF_TAKEN.to_string()))
            }
            _ => Ok(()),
        }
    }
}
