use crate::{
    dtos::{
        pagination::{Page, VideoLessonPage},
        query::VideoLessonQuery,
    },
    error::AppResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use database::services::VideoLessonService;
use models::{catalog::VideoLesson, forms::VideoLessonForm, views::VideoLessonDetails};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videoaulas", get(list_video_lessons).post(create_video_lesson))
        .route(
            "/videoaulas/{id}",
            get(get_video_lesson)
                .put(update_video_lesson)
                .delete(delete_video_lesson),
        )
}

/// Get a paginated, filtered list of video lessons with their joined data
#[utoipa::path(
    get,
    path = "/videoaulas",
    params(VideoLessonQuery),
    responses(
        (status = 200, description = "Video lessons, newest first", body = VideoLessonPage),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Store failure")
    ),
    tag = "Video lessons"
)]
pub async fn list_video_lessons(
    State(state): State<AppState>,
    Query(query): Query<VideoLessonQuery>,
) -> AppResult<Json<VideoLessonPage>> {
    let lessons = VideoLessonService::list(state.store(), &query.filter()).await?;
    let page = Page::slice(lessons, query.page, query.per_page);

    Ok(Json(page.into()))
}

/// Get a video lesson with its offering, discipline, professor and designer
#[utoipa::path(
    get,
    path = "/videoaulas/{id}",
    params(("id" = i32, Path, description = "Video lesson ID")),
    responses(
        (status = 200, description = "Video lesson found", body = VideoLessonDetails),
        (status = 404, description = "Video lesson not found")
    ),
    tag = "Video lessons"
)]
pub async fn get_video_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<VideoLessonDetails>> {
    Ok(Json(VideoLessonService::get(state.store(), id).await?))
}

/// Create a video lesson, creating its offering when it does not exist yet
#[utoipa::path(
    post,
    path = "/videoaulas",
    request_body = VideoLessonForm,
    responses(
        (status = 201, description = "Video lesson created", body = VideoLesson),
        (status = 400, description = "Blank title or invalid year/bimester"),
        (status = 404, description = "Discipline not found"),
        (status = 409, description = "Unknown professor or designer")
    ),
    tag = "Video lessons"
)]
pub async fn create_video_lesson(
    State(state): State<AppState>,
    Json(form): Json<VideoLessonForm>,
) -> AppResult<(StatusCode, Json<VideoLesson>)> {
    let lesson = VideoLessonService::create(state.store(), form).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    put,
    path = "/videoaulas/{id}",
    params(("id" = i32, Path, description = "Video lesson ID")),
    request_body = VideoLessonForm,
    responses(
        (status = 200, description = "Video lesson updated", body = VideoLesson),
        (status = 400, description = "Blank title or invalid year/bimester"),
        (status = 404, description = "Video lesson or discipline not found")
    ),
    tag = "Video lessons"
)]
pub async fn update_video_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<VideoLessonForm>,
) -> AppResult<Json<VideoLesson>> {
    Ok(Json(VideoLessonService::update(state.store(), id, form).await?))
}

#[utoipa::path(
    delete,
    path = "/videoaulas/{id}",
    params(("id" = i32, Path, description = "Video lesson ID")),
    responses(
        (status = 204, description = "Video lesson deleted"),
        (status = 404, description = "Video lesson not found")
    ),
    tag = "Video lessons"
)]
pub async fn delete_video_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    VideoLessonService::delete(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
