use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson, ValidatedQuery,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StatsResult;
use crate::models::{EndpointHit, StatsQuery, ViewStats};
use crate::repository::HitRepository;
use crate::service::StatsService;

pub const TAG: &str = "Stats";

#[derive(OpenApi)]
#[openapi(
    paths(record_hit, get_stats),
    components(
        schemas(EndpointHit, ViewStats),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "Endpoint hit statistics"))
)]
pub struct ApiDoc;

/// `/hit` and `/stats`
pub fn router<R: HitRepository + 'static>(service: StatsService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/hit", post(record_hit::<R>))
        .route("/stats", get(get_stats::<R>))
        .with_state(shared_service)
}

/// Record that an endpoint was requested
#[utoipa::path(
    post,
    path = "/hit",
    tag = TAG,
    request_body = EndpointHit,
    responses(
        (status = 201, description = "Hit saved", body = EndpointHit),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn record_hit<R: HitRepository>(
    State(service): State<Arc<StatsService<R>>>,
    ValidatedJson(hit): ValidatedJson<EndpointHit>,
) -> StatsResult<impl IntoResponse> {
    let saved = service.record_hit(hit).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// View counts per (app, uri) for a time window
#[utoipa::path(
    get,
    path = "/stats",
    tag = TAG,
    params(StatsQuery),
    responses(
        (status = 200, description = "Most viewed first", body = Vec<ViewStats>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_stats<R: HitRepository>(
    State(service): State<Arc<StatsService<R>>>,
    ValidatedQuery(query): ValidatedQuery<StatsQuery>,
) -> StatsResult<Json<Vec<ViewStats>>> {
    let stats = service.get_stats(query).await?;
    Ok(Json(stats))
}
