//! Professors and instructional designers share the same shape and routes

use crate::{dtos::query::NameQuery, error::AppResult, state::AppState};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use database::services::CatalogService;
use models::{
    catalog::{Designer, Professor},
    forms::PersonForm,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/professores", get(list_professors).post(create_professor))
        .route(
            "/professores/{id}",
            get(get_professor)
                .put(update_professor)
                .delete(delete_professor),
        )
        .route("/designers", get(list_designers).post(create_designer))
        .route(
            "/designers/{id}",
            get(get_designer).put(update_designer).delete(delete_designer),
        )
}

/// List professors, optionally filtered by name
#[utoipa::path(
    get,
    path = "/professores",
    params(NameQuery),
    responses((status = 200, description = "Professors in name order", body = [Professor])),
    tag = "People"
)]
pub async fn list_professors(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<Professor>>> {
    Ok(Json(
        CatalogService::list_professors(state.store(), query.nome.as_deref()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/professores/{id}",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor found", body = Professor),
        (status = 404, description = "Professor not found")
    ),
    tag = "People"
)]
pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Professor>> {
    Ok(Json(CatalogService::get_professor(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/professores",
    request_body = PersonForm,
    responses(
        (status = 201, description = "Professor created", body = Professor),
        (status = 400, description = "Blank nome")
    ),
    tag = "People"
)]
pub async fn create_professor(
    State(state): State<AppState>,
    Json(form): Json<PersonForm>,
) -> AppResult<(StatusCode, Json<Professor>)> {
    let professor = CatalogService::create_professor(state.store(), form).await?;
    Ok((StatusCode::CREATED, Json(professor)))
}

#[utoipa::path(
    put,
    path = "/professores/{id}",
    params(("id" = i32, Path, description = "Professor ID")),
    request_body = PersonForm,
    responses(
        (status = 200, description = "Professor updated", body = Professor),
        (status = 404, description = "Professor not found")
    ),
    tag = "People"
)]
pub async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<PersonForm>,
) -> AppResult<Json<Professor>> {
    Ok(Json(
        CatalogService::update_professor(state.store(), id, form).await?,
    ))
}

/// Delete a professor; offerings taught by them keep no professor
#[utoipa::path(
    delete,
    path = "/professores/{id}",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 204, description = "Professor deleted"),
        (status = 404, description = "Professor not found")
    ),
    tag = "People"
)]
pub async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogService::delete_professor(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List instructional designers, optionally filtered by name
#[utoipa::path(
    get,
    path = "/designers",
    params(NameQuery),
    responses((status = 200, description = "Designers in name order", body = [Designer])),
    tag = "People"
)]
pub async fn list_designers(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<Designer>>> {
    Ok(Json(
        CatalogService::list_designers(state.store(), query.nome.as_deref()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/designers/{id}",
    params(("id" = i32, Path, description = "Designer ID")),
    responses(
        (status = 200, description = "Designer found", body = Designer),
        (status = 404, description = "Designer not found")
    ),
    tag = "People"
)]
pub async fn get_designer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Designer>> {
    Ok(Json(CatalogService::get_designer(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/designers",
    request_body = PersonForm,
    responses(
        (status = 201, description = "Designer created", body = Designer),
        (status = 400, description = "Blank nome")
    ),
    tag = "People"
)]
pub async fn create_designer(
    State(state): State<AppState>,
    Json(form): Json<PersonForm>,
) -> AppResult<(StatusCode, Json<Designer>)> {
    let designer = CatalogService::create_designer(state.store(), form).await?;
    Ok((StatusCode::CREATED, Json(designer)))
}

#[utoipa::path(
    put,
    path = "/designers/{id}",
    params(("id" = i32, Path, description = "Designer ID")),
    request_body = PersonForm,
    responses(
        (status = 200, description = "Designer updated", body = Designer),
        (status = 404, description = "Designer not found")
    ),
    tag = "People"
)]
pub async fn update_designer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<PersonForm>,
) -> AppResult<Json<Designer>> {
    Ok(Json(
        CatalogService::update_designer(state.store(), id, form).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/designers/{id}",
    params(("id" = i32, Path, description = "Designer ID")),
    responses(
        (status = 204, description = "Designer deleted"),
        (status = 404, description = "Designer not found")
    ),
    tag = "People"
)]
pub async fn delete_designer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogService::delete_designer(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
