use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::date;
use super::validation::{
    validate_cpf, validate_past_date, validate_person_name, validate_state, validate_zip_code,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Gender {
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Male,
    #[serde(rename = "F")]
    #[sqlx(rename = "F")]
    Female,
    #[serde(rename = "O")]
    #[sqlx(rename = "O")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub birthdate: NaiveDate,
    pub cpf: String,
    pub gender: Gender,
    pub email: String,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRequest {
    #[validate(
        required(message = "Campo obrigatório"),
        custom(function = "validate_person_name")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_opt")]
    #[validate(
        required(message = "Campo obrigatório"),
        custom(function = "validate_past_date")
    )]
    pub birthdate: Option<NaiveDate>,
    #[validate(required(message = "Campo obrigatório"), custom(function = "validate_cpf"))]
    pub cpf: Option<String>,
    #[validate(required(message = "Campo obrigatório"))]
    pub gender: Option<Gender>,
    #[validate(
        required(message = "Campo obrigatório"),
        email(message = "E-mail inválido")
    )]
    pub email: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub street: Option<String>,
    #[validate(length(max = 20, message = "Máximo de 20 caracteres"))]
    pub number: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub complement: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub neighborhood: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub city: Option<String>,
    #[validate(custom(function = "validate_state"))]
    pub state: Option<String>,
    #[validate(custom(function = "validate_zip_code"))]
    pub zip_code: Option<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[validate(custom(function = "validate_person_name"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_opt")]
    #[validate(custom(function = "validate_past_date"))]
    pub birthdate: Option<NaiveDate>,
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,
    pub gender: Option<Gender>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub street: Option<String>,
    #[validate(length(max = 20, message = "Máximo de 20 caracteres"))]
    pub number: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub complement: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub neighborhood: Option<String>,
    #[validate(length(max = 120, message = "Máximo de 120 caracteres"))]
    pub city: Option<String>,
    #[validate(custom(function = "validate_state"))]
    pub state: Option<String>,
    #[validate(custom(function = "validate_zip_code"))]
    pub zip_code: Option<String>,
}
