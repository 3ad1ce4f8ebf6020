use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Brazilian CPF: 11 digits, not all equal, last two are mod-11 check digits.
/// Punctuation (`529.982.247-25`) is ignored.
pub fn is_valid_cpf(value: &str) -> bool {
    if value
        .chars()
        .any(|c| !(c.is_ascii_digit() || c == '.' || c == '-' || c == ' '))
    {
        return false;
    }
    let d: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.len() != 11 || d.iter().all(|&x| x == d[0]) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = d[..len]
            .iter()
            .enumerate()
            .map(|(i, &x)| x * (len as u32 + 1 - i as u32))
            .sum();
        let r = (sum * 10) % 11;
        if r == 10 { 0 } else { r }
    };

    check(9) == d[9] && check(10) == d[10]
}

pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if is_valid_cpf(value) {
        Ok(())
    } else {
        Err(invalid("cpf", "CPF inválido"))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "Campo obrigatório"))
    } else {
        Ok(())
    }
}

/// Student names: 3 to 120 characters once surrounding whitespace is dropped.
pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    match value.trim().chars().count() {
        0 => Err(invalid("blank", "Campo obrigatório")),
        3..=120 => Ok(()),
        _ => Err(invalid("length", "Deve ter entre 3 e 120 caracteres")),
    }
}

pub fn validate_course_name(value: &str) -> Result<(), ValidationError> {
    match value.trim().chars().count() {
        0 => Err(invalid("blank", "Campo obrigatório")),
        1..=120 => Ok(()),
        _ => Err(invalid("length", "Máximo de 120 caracteres")),
    }
}

pub fn validate_past_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Utc::now().date_naive() {
        Err(invalid("future_date", "A data não pode estar no futuro"))
    } else {
        Ok(())
    }
}

/// Empty is accepted; blank optional fields are stored as null.
pub fn validate_state(value: &str) -> Result<(), ValidationError> {
    let v = value.trim();
    if v.is_empty() || (v.len() == 2 && v.chars().all(|c| c.is_ascii_alphabetic())) {
        Ok(())
    } else {
        Err(invalid("state", "UF deve ter duas letras"))
    }
}

pub fn validate_zip_code(value: &str) -> Result<(), ValidationError> {
    let v = value.trim();
    let well_formed = v.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '.');
    if v.is_empty() || (well_formed && digits(v).len() == 8) {
        Ok(())
    } else {
        Err(invalid("zip_code", "CEP deve ter 8 dígitos"))
    }
}

/// Trims and turns blank strings into `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
