use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header::CONTENT_TYPE},
};
use database::store::{CatalogSnapshot, MemoryStore};
use http_body_util::BodyExt;
use models::catalog::{Course, CourseDiscipline, Discipline, Offering, VideoLesson};
use serde_json::Value;
use server::{app, state::AppState};
use tower::ServiceExt;

/// Three courses, two disciplines (one linked to courses 1 and 2), two 2024
/// offerings in bimesters 1 and 2, and five lessons split 3/2
pub fn scenario() -> CatalogSnapshot {
    CatalogSnapshot {
        courses: vec![
            course(1, "Administração"),
            course(2, "Logística"),
            course(3, "Marketing"),
        ],
        disciplines: vec![
            discipline(10, "ADM001", "Gestão de Pessoas"),
            discipline(20, "GER001", "Estatística"),
        ],
        links: vec![link(1, 10), link(2, 10)],
        offerings: vec![offering(100, 10, 1), offering(200, 20, 2)],
        video_lessons: vec![
            lesson(1, 100, "Liderança"),
            lesson(2, 100, "Motivação"),
            lesson(3, 100, "Feedback"),
            lesson(4, 200, "Média e mediana"),
            lesson(5, 200, "Desvio padrão"),
        ],
        ..Default::default()
    }
}

pub fn course(id: i32, nome: &str) -> Course {
    Course {
        id,
        eixo: "Gestão e Negócios".to_string(),
        nome: nome.to_string(),
    }
}

pub fn discipline(id: i32, codigo: &str, nome: &str) -> Discipline {
    Discipline {
        id,
        codigo: codigo.to_string(),
        nome: nome.to_string(),
        carga_horaria: 40,
    }
}

pub fn link(curso_id: i32, disciplina_id: i32) -> CourseDiscipline {
    CourseDiscipline {
        curso_id,
        disciplina_id,
        ano_curso: None,
        bimestre_pedagogico: None,
    }
}

pub fn offering(id: i32, disciplina_id: i32, bimestre: i32) -> Offering {
    Offering {
        id,
        disciplina_id,
        ano: Some(2024),
        bimestre_operacional: Some(bimestre),
        professor_id: None,
        di_id: None,
        tipo: Offering::DEFAULT_TYPE.to_string(),
    }
}

pub fn lesson(id: i32, oferta_disciplina_id: i32, titulo: &str) -> VideoLesson {
    VideoLesson {
        id,
        oferta_disciplina_id,
        semana: None,
        numero_aula: None,
        titulo: titulo.to_string(),
        sinopse: None,
        link_youtube_original: None,
        slides_disponivel: false,
        status: None,
        id_tv_cultura: None,
        duracao_minutos: None,
        link_libras: None,
        link_audiodescricao: None,
        cc_legenda: false,
        link_download: None,
    }
}

pub fn build_test_app(store: MemoryStore) -> Router {
    app(AppState::new(store))
}

pub fn seeded_app() -> Router {
    build_test_app(MemoryStore::from_snapshot(scenario()))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
