//! Portuguese wire shapes of the legacy `alunos`/`cursos`/`matriculas`
//! surface and their mapping to the shared domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Course, Enrollment, EnrollmentStatus, Gender, NewCourseRequest, NewEnrollmentRequest,
    NewStudentRequest, Page, Student, UpdateCourseRequest, UpdateEnrollmentRequest,
    UpdateStudentRequest, date,
};

/// Translates domain field names into the legacy wire names.
pub fn campo(field: &str) -> String {
    match field {
        "name" => "nome",
        "birthdate" => "dataNascimento",
        "gender" => "sexo",
        "street" => "logradouro",
        "number" => "numero",
        "complement" => "complemento",
        "neighborhood" => "bairro",
        "city" => "cidade",
        "state" => "estado",
        "zip_code" => "cep",
        "student_id" => "alunoId",
        "course_id" => "cursoId",
        "completion_date" => "dataConclusao",
        other => other,
    }
    .to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlunoPayload {
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_opt")]
    pub data_nascimento: Option<NaiveDate>,
    pub cpf: Option<String>,
    pub sexo: Option<Gender>,
    pub email: Option<String>,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
}

impl From<AlunoPayload> for NewStudentRequest {
    fn from(p: AlunoPayload) -> Self {
        Self {
            name: p.nome,
            birthdate: p.data_nascimento,
            cpf: p.cpf,
            gender: p.sexo,
            email: p.email,
            street: p.logradouro,
            number: p.numero,
            complement: p.complemento,
            neighborhood: p.bairro,
            city: p.cidade,
            state: p.estado,
            zip_code: p.cep,
        }
    }
}

impl From<AlunoPayload> for UpdateStudentRequest {
    fn from(p: AlunoPayload) -> Self {
        Self {
            name: p.nome,
            birthdate: p.data_nascimento,
            cpf: p.cpf,
            gender: p.sexo,
            email: p.email,
            street: p.logradouro,
            number: p.numero,
            complement: p.complemento,
            neighborhood: p.bairro,
            city: p.cidade,
            state: p.estado,
            zip_code: p.cep,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    pub id: String,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub cpf: String,
    pub sexo: Gender,
    pub email: String,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<Student> for Aluno {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            nome: s.name,
            data_nascimento: s.birthdate,
            cpf: s.cpf,
            sexo: s.gender,
            email: s.email,
            logradouro: s.street,
            numero: s.number,
            complemento: s.complement,
            bairro: s.neighborhood,
            cidade: s.city,
            estado: s.state,
            cep: s.zip_code,
            criado_em: s.created_at,
            atualizado_em: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursoPayload {
    pub nome: Option<String>,
}

impl From<CursoPayload> for NewCourseRequest {
    fn from(p: CursoPayload) -> Self {
        Self { name: p.nome }
    }
}

impl From<CursoPayload> for UpdateCourseRequest {
    fn from(p: CursoPayload) -> Self {
        Self { name: p.nome }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Curso {
    pub id: String,
    pub nome: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<Course> for Curso {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            nome: c.name,
            criado_em: c.created_at,
            atualizado_em: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatriculaPayload {
    pub aluno_id: Option<String>,
    pub curso_id: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_patch")]
    pub data_conclusao: Option<Option<NaiveDate>>,
}

impl From<MatriculaPayload> for NewEnrollmentRequest {
    fn from(p: MatriculaPayload) -> Self {
        Self {
            student_id: p.aluno_id,
            course_id: p.curso_id,
            completion_date: p.data_conclusao.flatten(),
        }
    }
}

impl From<MatriculaPayload> for UpdateEnrollmentRequest {
    fn from(p: MatriculaPayload) -> Self {
        Self {
            student_id: p.aluno_id,
            course_id: p.curso_id,
            completion_date: p.data_conclusao,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusMatricula {
    Concluido,
    EmAndamento,
}

impl From<EnrollmentStatus> for StatusMatricula {
    fn from(s: EnrollmentStatus) -> Self {
        match s {
            EnrollmentStatus::Completed => StatusMatricula::Concluido,
            EnrollmentStatus::InProgress => StatusMatricula::EmAndamento,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Matricula {
    pub id: String,
    pub aluno_id: String,
    pub curso_id: String,
    pub nome_aluno: String,
    pub nome_curso: String,
    pub data_conclusao: Option<NaiveDate>,
    pub status: StatusMatricula,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<Enrollment> for Matricula {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id,
            aluno_id: e.student_id,
            curso_id: e.course_id,
            nome_aluno: e.student_name,
            nome_curso: e.course_name,
            data_conclusao: e.completion_date,
            status: e.status.into(),
            criado_em: e.created_at,
            atualizado_em: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagina<T> {
    pub dados: Vec<T>,
    pub total: i64,
    pub pagina: u32,
    pub limite: u32,
    pub total_paginas: u32,
}

impl<U> Pagina<U> {
    pub fn from_page<T>(page: Page<T>) -> Self
    where
        U: From<T>,
    {
        Self {
            dados: page.items.into_iter().map(U::from).collect(),
            total: page.total,
            pagina: page.page,
            limite: page.limit,
            total_paginas: page.total_pages,
        }
    }
}
