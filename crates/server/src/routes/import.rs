use crate::{
    dtos::import::{CsvImportQuery, DisciplineImportRequest},
    error::AppResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use database::services::ImportService;
use models::import::{DISCIPLINE_TEMPLATE, ImportHistory, ImportReport};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/importacao/disciplinas", post(import_disciplines))
        .route("/importacao/disciplinas/csv", post(import_discipline_csv))
        .route("/importacao/disciplinas/modelo", get(discipline_template))
        .route("/importacao/historico", get(history))
}

/// Import disciplines row by row; each row reports its own outcome
#[utoipa::path(
    post,
    path = "/importacao/disciplinas",
    request_body = DisciplineImportRequest,
    responses(
        (status = 200, description = "Per-row results and totals", body = ImportReport),
        (status = 500, description = "Courses could not be fetched")
    ),
    tag = "Import"
)]
pub async fn import_disciplines(
    State(state): State<AppState>,
    Json(request): Json<DisciplineImportRequest>,
) -> AppResult<Json<ImportReport>> {
    let report = ImportService::import_disciplines(
        state.store(),
        request.disciplinas,
        request.nome_arquivo.as_deref(),
    )
    .await?;

    Ok(Json(report))
}

/// Import disciplines from a CSV document sent as the request body
#[utoipa::path(
    post,
    path = "/importacao/disciplinas/csv",
    params(CsvImportQuery),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Per-row results and totals", body = ImportReport),
        (status = 400, description = "Malformed CSV or missing columns")
    ),
    tag = "Import"
)]
pub async fn import_discipline_csv(
    State(state): State<AppState>,
    Query(query): Query<CsvImportQuery>,
    body: String,
) -> AppResult<Json<ImportReport>> {
    let report = ImportService::import_discipline_csv(
        state.store(),
        body.as_bytes(),
        query.nome_arquivo.as_deref(),
    )
    .await?;

    Ok(Json(report))
}

/// CSV template for discipline imports
#[utoipa::path(
    get,
    path = "/importacao/disciplinas/modelo",
    responses(
        (status = 200, description = "Template file", content_type = "text/csv", body = String)
    ),
    tag = "Import"
)]
pub async fn discipline_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"modelo_disciplinas.csv\"",
            ),
        ],
        DISCIPLINE_TEMPLATE,
    )
}

/// Past imports, newest first
#[utoipa::path(
    get,
    path = "/importacao/historico",
    responses((status = 200, description = "Import history", body = [ImportHistory])),
    tag = "Import"
)]
pub async fn history(State(state): State<AppState>) -> AppResult<Json<Vec<ImportHistory>>> {
    Ok(Json(ImportService::history(state.store()).await?))
}
