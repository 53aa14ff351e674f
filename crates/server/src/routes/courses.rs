use crate::{error::AppResult, state::AppState};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use database::services::CatalogService;
use models::{
    catalog::{Course, Discipline},
    forms::CourseForm,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cursos", get(list_courses).post(create_course))
        .route(
            "/cursos/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/cursos/{id}/disciplinas", get(course_disciplines))
}

/// List all courses by name
#[utoipa::path(
    get,
    path = "/cursos",
    responses(
        (status = 200, description = "Courses in name order", body = [Course]),
        (status = 500, description = "Store failure")
    ),
    tag = "Courses"
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    Ok(Json(CatalogService::list_courses(state.store()).await?))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/cursos/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Course>> {
    Ok(Json(CatalogService::get_course(state.store(), id).await?))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/cursos",
    request_body = CourseForm,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Blank eixo or nome")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(form): Json<CourseForm>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let course = CatalogService::create_course(state.store(), form).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/cursos/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = CourseForm,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Blank eixo or nome"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<CourseForm>,
) -> AppResult<Json<Course>> {
    Ok(Json(
        CatalogService::update_course(state.store(), id, form).await?,
    ))
}

/// Delete a course together with its discipline links
#[utoipa::path(
    delete,
    path = "/cursos/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogService::delete_course(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Disciplines linked to a course
#[utoipa::path(
    get,
    path = "/cursos/{id}/disciplinas",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Linked disciplines in name order", body = [Discipline]),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn course_disciplines(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Discipline>>> {
    Ok(Json(
        CatalogService::disciplines_of_course(state.store(), id).await?,
    ))
}
