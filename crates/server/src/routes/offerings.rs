use crate::{error::AppResult, state::AppState};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use database::services::CatalogService;
use models::{catalog::Offering, forms::OfferingForm};

pub fn router() -> Router<AppState> {
    Router::new().route("/ofertas", get(list_offerings)).route(
        "/ofertas/{id}",
        get(get_offering).put(update_offering).delete(delete_offering),
    )
}

#[utoipa::path(
    get,
    path = "/ofertas",
    responses((status = 200, description = "Offerings by ID", body = [Offering])),
    tag = "Offerings"
)]
pub async fn list_offerings(State(state): State<AppState>) -> AppResult<Json<Vec<Offering>>> {
    Ok(Json(CatalogService::list_offerings(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/ofertas/{id}",
    params(("id" = i32, Path, description = "Offering ID")),
    responses(
        (status = 200, description = "Offering found", body = Offering),
        (status = 404, description = "Offering not found")
    ),
    tag = "Offerings"
)]
pub async fn get_offering(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Offering>> {
    Ok(Json(CatalogService::get_offering(state.store(), id).await?))
}

/// Reassign an offering's professor, designer or type
#[utoipa::path(
    put,
    path = "/ofertas/{id}",
    params(("id" = i32, Path, description = "Offering ID")),
    request_body = OfferingForm,
    responses(
        (status = 200, description = "Offering updated", body = Offering),
        (status = 404, description = "Offering not found"),
        (status = 409, description = "Unknown professor or designer")
    ),
    tag = "Offerings"
)]
pub async fn update_offering(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<OfferingForm>,
) -> AppResult<Json<Offering>> {
    Ok(Json(
        CatalogService::update_offering(state.store(), id, form).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/ofertas/{id}",
    params(("id" = i32, Path, description = "Offering ID")),
    responses(
        (status = 204, description = "Offering deleted"),
        (status = 404, description = "Offering not found"),
        (status = 409, description = "Video lessons still reference the offering")
    ),
    tag = "Offerings"
)]
pub async fn delete_offering(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogService::delete_offering(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
