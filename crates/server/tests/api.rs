//! HTTP tests against the full router over an in-memory catalog

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use common::{body_bytes, body_json, get, seeded_app, send, send_json};
use database::store::MemoryStore;
use models::catalog::Collection;
use serde_json::{Value, json};

fn ids(listing: &Value) -> Vec<i64> {
    listing["videoaulas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["videoaula"]["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = get(seeded_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = get(seeded_app(), "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(response).await;
    assert!(doc["paths"]["/estatisticas/por-curso"].is_object());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(seeded_app(), "/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn per_course_counts_linked_lessons() {
    let response = get(seeded_app(), "/estatisticas/por-curso").await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = body_json(response).await;
    let summary: Vec<(i64, i64)> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| (row["curso"]["id"].as_i64().unwrap(), row["total"].as_i64().unwrap()))
        .collect();
    assert_eq!(summary, vec![(1, 3), (2, 3)]);
}

#[tokio::test]
async fn year_and_bimester_statistics() {
    let app = seeded_app();

    let rows = body_json(get(app.clone(), "/estatisticas/por-ano-bimestre").await).await;
    assert_eq!(
        rows,
        json!([{ "ano": 2024, "bim1": 3, "bim2": 2, "bim3": 0, "bim4": 0 }])
    );

    let years = body_json(get(app.clone(), "/estatisticas/por-ano").await).await;
    assert_eq!(years, json!([{ "ano": 2024, "total": 5 }]));

    let evolution = body_json(get(app, "/estatisticas/evolucao").await).await;
    assert_eq!(evolution[0]["acumulado"], 5);
}

#[tokio::test]
async fn overview_counts_each_collection() {
    let overview = body_json(get(seeded_app(), "/estatisticas/visao-geral").await).await;
    assert_eq!(
        overview,
        json!({
            "totalVideoaulas": 5,
            "totalDisciplinas": 2,
            "totalCursos": 3,
            "totalProfessores": 0,
        })
    );
}

#[tokio::test]
async fn store_failure_is_a_500_with_message() {
    let store = MemoryStore::from_snapshot(common::scenario());
    store.fail_on(Collection::VideoLessons).await;
    let app = common::build_test_app(store);

    let response = get(app, "/estatisticas/acessibilidade").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["code"], "STORE_ERROR");
    assert!(body["error"].as_str().unwrap().contains("videoaulas"));
}

#[tokio::test]
async fn video_lessons_are_paginated_newest_first() {
    let response = get(seeded_app(), "/videoaulas?page=1&perPage=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await;
    assert_eq!(ids(&page), vec![5, 4]);
    assert_eq!(page["pagination"]["totalItems"], 5);
    assert_eq!(page["pagination"]["totalPages"], 3);
    assert_eq!(page["pagination"]["hasNext"], true);
    assert_eq!(page["videoaulas"][0]["disciplina"]["codigo"], "GER001");
}

#[tokio::test]
async fn video_lesson_filters() {
    let app = seeded_app();

    let by_course = body_json(get(app.clone(), "/videoaulas?cursoId=2").await).await;
    assert_eq!(ids(&by_course), vec![3, 2, 1]);

    let unlinked = body_json(get(app.clone(), "/videoaulas?cursoId=3").await).await;
    assert!(ids(&unlinked).is_empty());

    let search = body_json(get(app.clone(), "/videoaulas?busca=DESVIO").await).await;
    assert_eq!(ids(&search), vec![5]);

    let ignored = body_json(get(app, "/videoaulas?ano=0&bimestre=2").await).await;
    assert_eq!(ids(&ignored), vec![5, 4]);
}

#[tokio::test]
async fn create_course_validates_and_persists() {
    let app = seeded_app();

    let blank = send_json(
        app.clone(),
        Method::POST,
        "/cursos",
        json!({ "eixo": "Informação e Comunicação", "nome": "  " }),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(blank).await["code"], "VALIDATION_ERROR");

    let created = send_json(
        app.clone(),
        Method::POST,
        "/cursos",
        json!({ "eixo": "Informação e Comunicação", "nome": "Redes" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let course = body_json(created).await;
    assert_eq!(course["id"], 4);

    let courses = body_json(get(app, "/cursos").await).await;
    assert_eq!(courses.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn missing_records_are_404() {
    let app = seeded_app();

    let response = get(app.clone(), "/cursos/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let by_code = get(app.clone(), "/disciplinas/codigo/XYZ999").await;
    assert_eq!(by_code.status(), StatusCode::NOT_FOUND);

    let lesson = get(app, "/videoaulas/99").await;
    assert_eq!(lesson.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_discipline_code_is_a_conflict() {
    let response = send_json(
        seeded_app(),
        Method::POST,
        "/disciplinas",
        json!({ "codigo": "ADM001", "nome": "Outra", "cursoIds": [3] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn discipline_lookup_and_course_links() {
    let app = seeded_app();

    let found = body_json(get(app.clone(), "/disciplinas/codigo/GER001").await).await;
    assert_eq!(found["id"], 20);

    let of_course = body_json(get(app.clone(), "/cursos/1/disciplinas").await).await;
    assert_eq!(of_course, json!([{
        "id": 10,
        "codigo": "ADM001",
        "nome": "Gestão de Pessoas",
        "cargaHoraria": 40,
    }]));

    let deleted = send(
        app.clone(),
        Request::delete("/cursos/1").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let views = body_json(get(app, "/disciplinas/com-cursos").await).await;
    let adm = views
        .as_array()
        .unwrap()
        .iter()
        .find(|view| view["disciplina"]["codigo"] == "ADM001")
        .unwrap();
    assert_eq!(adm["cursos"].as_array().unwrap().len(), 1);
    assert_eq!(adm["cursos"][0]["id"], 2);
}

#[tokio::test]
async fn creating_lessons_reuses_the_offering() {
    let app = seeded_app();
    let form = json!({
        "disciplinaId": 20,
        "ano": 2025,
        "bimestreOperacional": 3,
        "titulo": "Probabilidade",
        "ccLegenda": true,
    });

    for _ in 0..2 {
        let response = send_json(app.clone(), Method::POST, "/videoaulas", form.clone()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let offerings = body_json(get(app.clone(), "/ofertas").await).await;
    assert_eq!(offerings.as_array().unwrap().len(), 3);

    let coverage = body_json(get(app, "/estatisticas/acessibilidade").await).await;
    assert_eq!(coverage["comCC"], 2);
    assert_eq!(coverage["total"], 7);
}

#[tokio::test]
async fn lesson_for_unknown_discipline_is_rejected() {
    let response = send_json(
        seeded_app(),
        Method::POST,
        "/videoaulas",
        json!({
            "disciplinaId": 999,
            "ano": 2025,
            "bimestreOperacional": 1,
            "titulo": "Sem disciplina",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn csv_import_reports_each_row_and_records_history() {
    let app = seeded_app();
    let csv = "codigo,nome,cursos\nMAT001,Matemática,\"1,99\"\nADM001,Duplicada,1\n";

    let request = Request::post("/importacao/disciplinas/csv?nomeArquivo=lote.csv")
        .header(CONTENT_TYPE, "text/csv")
        .body(Body::from(csv))
        .unwrap();
    let response = send(app.clone(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["resultados"][0]["status"], "success");
    assert!(
        report["resultados"][0]["message"]
            .as_str()
            .unwrap()
            .contains("99")
    );
    assert_eq!(report["resultados"][1]["status"], "error");
    assert_eq!(
        report["resumo"],
        json!({ "totalLinhas": 2, "sucessos": 1, "erros": 1 })
    );
    assert_eq!(report["historico"]["nomeArquivo"], "lote.csv");

    let history = body_json(get(app.clone(), "/importacao/historico").await).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let linked = body_json(get(app, "/cursos/1/disciplinas").await).await;
    assert_eq!(linked.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn json_import_without_file_name_is_not_recorded() {
    let app = seeded_app();
    let response = send_json(
        app.clone(),
        Method::POST,
        "/importacao/disciplinas",
        json!({ "disciplinas": [{ "codigo": "", "nome": "Sem código" }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["resultados"][0]["status"], "error");
    assert_eq!(report["historico"], Value::Null);

    let history = body_json(get(app, "/importacao/historico").await).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn template_is_served_as_csv() {
    let response = get(seeded_app(), "/importacao/disciplinas/modelo").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("codigo,nome,cursos"));
}
