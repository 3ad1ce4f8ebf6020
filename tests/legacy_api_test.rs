mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{CPFS, aluno_body, app, call, id_of, student_body};

#[tokio::test]
async fn aluno_uses_portuguese_fields() {
    let router = app().await;

    let (status, aluno) = call(&router, "POST", "/api/alunos", Some(aluno_body("João Pereira", CPFS[1]))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(aluno["nome"], "João Pereira");
    assert_eq!(aluno["dataNascimento"], "2001-04-12");
    assert_eq!(aluno["sexo"], "M");
    assert_eq!(aluno["cep"], "80010000");
    assert!(aluno["criadoEm"].is_string());
    assert!(aluno.get("name").is_none());

    let id = id_of(&aluno);
    let (status, aluno) = call(
        &router,
        "PUT",
        &format!("/api/alunos/{id}"),
        Some(json!({ "bairro": "Centro" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aluno["bairro"], "Centro");
    assert_eq!(aluno["cidade"], "Curitiba");

    let (status, page) = call(&router, "GET", "/api/alunos?busca=pereira&pagina=1&limite=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["pagina"], 1);
    assert_eq!(page["limite"], 5);
    assert_eq!(page["totalPaginas"], 1);
    assert_eq!(page["dados"][0]["nome"], "João Pereira");
}

#[tokio::test]
async fn validation_errors_name_portuguese_fields() {
    let router = app().await;
    let (status, body) = call(
        &router,
        "POST",
        "/api/alunos",
        Some(json!({ "nome": "Jo", "cpf": "000.000.000-00", "cep": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["mensagem"], "Dados inválidos");

    let campos: Vec<&str> = body["erros"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["campo"].as_str().unwrap())
        .collect();
    for expected in ["nome", "dataNascimento", "cpf", "sexo", "email", "cep"] {
        assert!(campos.contains(&expected), "no error for {expected}: {campos:?}");
    }
    assert!(!campos.contains(&"zipCode"));
}

#[tokio::test]
async fn legacy_and_current_data_are_separate() {
    let router = app().await;

    let (status, _) = call(&router, "POST", "/api/cursos", Some(json!({ "nome": "Filosofia" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same name on the other surface is not a duplicate.
    let (status, _) = call(&router, "POST", "/api/courses", Some(json!({ "name": "Filosofia" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(&router, "POST", "/api/cursos", Some(json!({ "nome": "Filosofia" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Same CPF may exist once per surface.
    let (status, student) = call(&router, "POST", "/api/students", Some(student_body("Maria Silva", CPFS[0]))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(&router, "POST", "/api/alunos", Some(aluno_body("Maria Silva", CPFS[0]))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(&router, "GET", &format!("/api/alunos/{}", id_of(&student)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn matricula_status_in_portuguese() {
    let router = app().await;
    let (_, aluno) = call(&router, "POST", "/api/alunos", Some(aluno_body("João Pereira", CPFS[1]))).await;
    let (_, curso) = call(&router, "POST", "/api/cursos", Some(json!({ "nome": "Engenharia" }))).await;
    let aluno_id = id_of(&aluno);
    let curso_id = id_of(&curso);

    let (status, m) = call(
        &router,
        "POST",
        "/api/matriculas",
        Some(json!({ "alunoId": aluno_id, "cursoId": curso_id, "dataConclusao": "2018-11-30T03:00:00.000Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(m["status"], "CONCLUIDO");
    assert_eq!(m["dataConclusao"], "2018-11-30");
    assert_eq!(m["nomeAluno"], "João Pereira");
    assert_eq!(m["nomeCurso"], "Engenharia");
    let id = id_of(&m);

    let (status, m) = call(
        &router,
        "PUT",
        &format!("/api/matriculas/{id}"),
        Some(json!({ "dataConclusao": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(m["status"], "EM_ANDAMENTO");

    let (status, _) = call(
        &router,
        "POST",
        "/api/matriculas",
        Some(json!({ "alunoId": aluno_id, "cursoId": curso_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, page) = call(&router, "GET", &format!("/api/matriculas?alunoId={aluno_id}&status=EM_ANDAMENTO"), None).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["dados"][0]["id"], id);

    let (status, body) = call(&router, "POST", "/api/matriculas", Some(json!({ "cursoId": curso_id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["erros"][0]["campo"], "alunoId");

    let (status, _) = call(&router, "DELETE", &format!("/api/alunos/{aluno_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&router, "GET", &format!("/api/matriculas/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
