//! Dashboard statistics, recomputed from fresh reads on every request

use crate::{error::AppResult, state::AppState};
use axum::{Json, Router, extract::State, routing::get};
use database::services::StatsService;
use models::stats::{
    AccessibilityCoverage, BimesterTotal, CourseLessonStats, Overview, YearBimesterRow,
    YearEvolution, YearTotal,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estatisticas/visao-geral", get(overview))
        .route("/estatisticas/acessibilidade", get(accessibility))
        .route("/estatisticas/por-curso", get(per_course))
        .route("/estatisticas/por-ano", get(per_year))
        .route("/estatisticas/por-bimestre", get(per_bimester))
        .route("/estatisticas/por-ano-bimestre", get(per_year_bimester))
        .route("/estatisticas/evolucao", get(evolution))
}

#[utoipa::path(
    get,
    path = "/estatisticas/visao-geral",
    responses((status = 200, description = "Catalog totals", body = Overview)),
    tag = "Statistics"
)]
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<Overview>> {
    Ok(Json(StatsService::overview(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/estatisticas/acessibilidade",
    responses((status = 200, description = "Accessibility coverage", body = AccessibilityCoverage)),
    tag = "Statistics"
)]
pub async fn accessibility(
    State(state): State<AppState>,
) -> AppResult<Json<AccessibilityCoverage>> {
    Ok(Json(StatsService::accessibility(state.store()).await?))
}

/// Lessons per course; courses without lessons are omitted
#[utoipa::path(
    get,
    path = "/estatisticas/por-curso",
    responses((status = 200, description = "Per-course totals", body = [CourseLessonStats])),
    tag = "Statistics"
)]
pub async fn per_course(State(state): State<AppState>) -> AppResult<Json<Vec<CourseLessonStats>>> {
    Ok(Json(StatsService::per_course(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/estatisticas/por-ano",
    responses((status = 200, description = "Lessons per offering year", body = [YearTotal])),
    tag = "Statistics"
)]
pub async fn per_year(State(state): State<AppState>) -> AppResult<Json<Vec<YearTotal>>> {
    Ok(Json(StatsService::per_year(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/estatisticas/por-bimestre",
    responses((status = 200, description = "Lessons per operational bimester", body = [BimesterTotal])),
    tag = "Statistics"
)]
pub async fn per_bimester(State(state): State<AppState>) -> AppResult<Json<Vec<BimesterTotal>>> {
    Ok(Json(StatsService::per_bimester(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/estatisticas/por-ano-bimestre",
    responses((status = 200, description = "Year rows with one column per bimester", body = [YearBimesterRow])),
    tag = "Statistics"
)]
pub async fn per_year_bimester(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<YearBimesterRow>>> {
    Ok(Json(StatsService::per_year_bimester(state.store()).await?))
}

/// Yearly totals with a running sum
#[utoipa::path(
    get,
    path = "/estatisticas/evolucao",
    responses((status = 200, description = "Cumulative yearly evolution", body = [YearEvolution])),
    tag = "Statistics"
)]
pub async fn evolution(State(state): State<AppState>) -> AppResult<Json<Vec<YearEvolution>>> {
    Ok(Json(StatsService::evolution(state.store()).await?))
}
