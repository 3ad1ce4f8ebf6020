#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use enrollment_manager::api::router;
use enrollment_manager::db;
use enrollment_manager::state::AppState;

pub async fn app() -> Router {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create database");
    router(AppState { db: pool })
}

pub async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Valid CPFs, one per test student.
pub const CPFS: [&str; 3] = ["529.982.247-25", "111.444.777-35", "935.411.347-80"];

pub fn student_body(name: &str, cpf: &str) -> Value {
    json!({
        "name": name,
        "birthdate": "2001-04-12",
        "cpf": cpf,
        "gender": "F",
        "email": "aluna@example.com",
        "street": "Av. Paulista",
        "number": "1000",
        "city": "São Paulo",
        "state": "SP",
        "zipCode": "01310-100"
    })
}

pub fn aluno_body(nome: &str, cpf: &str) -> Value {
    json!({
        "nome": nome,
        "dataNascimento": "2001-04-12",
        "cpf": cpf,
        "sexo": "M",
        "email": "aluno@example.com",
        "cidade": "Curitiba",
        "estado": "PR",
        "cep": "80010-000"
    })
}

pub fn id_of(v: &Value) -> String {
    v["id"].as_str().expect("response has no id").to_string()
}
