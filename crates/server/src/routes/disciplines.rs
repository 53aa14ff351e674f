use crate::{error::AppResult, state::AppState};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use database::services::CatalogService;
use models::{catalog::Discipline, forms::DisciplineForm, views::DisciplineWithCourses};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/disciplinas", get(list_disciplines).post(create_discipline))
        .route("/disciplinas/com-cursos", get(disciplines_with_courses))
        .route("/disciplinas/codigo/{codigo}", get(get_discipline_by_code))
        .route(
            "/disciplinas/{id}",
            get(get_discipline)
                .put(update_discipline)
                .delete(delete_discipline),
        )
}

/// List all disciplines by name
#[utoipa::path(
    get,
    path = "/disciplinas",
    responses((status = 200, description = "Disciplines in name order", body = [Discipline])),
    tag = "Disciplines"
)]
pub async fn list_disciplines(State(state): State<AppState>) -> AppResult<Json<Vec<Discipline>>> {
    Ok(Json(CatalogService::list_disciplines(state.store()).await?))
}

/// Disciplines together with the courses they are linked to
#[utoipa::path(
    get,
    path = "/disciplinas/com-cursos",
    responses((status = 200, description = "Disciplines with linked courses", body = [DisciplineWithCourses])),
    tag = "Disciplines"
)]
pub async fn disciplines_with_courses(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DisciplineWithCourses>>> {
    Ok(Json(
        CatalogService::disciplines_with_courses(state.store()).await?,
    ))
}

/// Look a discipline up by its unique code
#[utoipa::path(
    get,
    path = "/disciplinas/codigo/{codigo}",
    params(("codigo" = String, Path, description = "Discipline code")),
    responses(
        (status = 200, description = "Discipline found", body = Discipline),
        (status = 404, description = "No discipline with this code")
    ),
    tag = "Disciplines"
)]
pub async fn get_discipline_by_code(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> AppResult<Json<Discipline>> {
    Ok(Json(
        CatalogService::get_discipline_by_code(state.store(), &codigo).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/disciplinas/{id}",
    params(("id" = i32, Path, description = "Discipline ID")),
    responses(
        (status = 200, description = "Discipline found", body = Discipline),
        (status = 404, description = "Discipline not found")
    ),
    tag = "Disciplines"
)]
pub async fn get_discipline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Discipline>> {
    Ok(Json(CatalogService::get_discipline(state.store(), id).await?))
}

/// Create a discipline linked to the given courses
#[utoipa::path(
    post,
    path = "/disciplinas",
    request_body = DisciplineForm,
    responses(
        (status = 201, description = "Discipline created", body = Discipline),
        (status = 400, description = "Blank codigo or nome"),
        (status = 409, description = "Duplicate codigo or unknown course")
    ),
    tag = "Disciplines"
)]
pub async fn create_discipline(
    State(state): State<AppState>,
    Json(form): Json<DisciplineForm>,
) -> AppResult<(StatusCode, Json<Discipline>)> {
    let discipline = CatalogService::create_discipline(state.store(), form).await?;
    Ok((StatusCode::CREATED, Json(discipline)))
}

/// Update a discipline; `cursoIds`, when present, replaces its course links
#[utoipa::path(
    put,
    path = "/disciplinas/{id}",
    params(("id" = i32, Path, description = "Discipline ID")),
    request_body = DisciplineForm,
    responses(
        (status = 200, description = "Discipline updated", body = Discipline),
        (status = 400, description = "Blank codigo or nome"),
        (status = 404, description = "Discipline not found"),
        (status = 409, description = "Duplicate codigo or unknown course")
    ),
    tag = "Disciplines"
)]
pub async fn update_discipline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<DisciplineForm>,
) -> AppResult<Json<Discipline>> {
    Ok(Json(
        CatalogService::update_discipline(state.store(), id, form).await?,
    ))
}

/// Delete a discipline together with its course links
#[utoipa::path(
    delete,
    path = "/disciplinas/{id}",
    params(("id" = i32, Path, description = "Discipline ID")),
    responses(
        (status = 204, description = "Discipline deleted"),
        (status = 404, description = "Discipline not found"),
        (status = 409, description = "Offerings still reference the discipline")
    ),
    tag = "Disciplines"
)]
pub async fn delete_discipline(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogService::delete_discipline(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
