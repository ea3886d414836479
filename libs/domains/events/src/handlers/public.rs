use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    ClientIp, PageParams, ValidPath, ValidatedQuery,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::PUBLIC_TAG;
use crate::comment_service::CommentService;
use crate::compilation_service::CompilationService;
use crate::error::EventResult;
use crate::models::{
    CommentDto, CompilationDto, CompilationQuery, EventFull, EventShort, PublicEventQuery,
};
use crate::service::EventService;

#[derive(OpenApi)]
#[openapi(
    paths(list_events, get_event, list_comments, list_compilations, get_compilation),
    components(
        schemas(EventShort, EventFull, CommentDto, CompilationDto),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags((name = PUBLIC_TAG, description = "Published events, their comments and compilations"))
)]
pub struct PublicApiDoc;

/// Routes for `/events`
pub fn public_events_router(events: EventService, comments: CommentService) -> Router {
    let events = Router::new()
        .route("/", get(list_events))
        .route("/{event_id}", get(get_event))
        .with_state(Arc::new(events));

    let comments = Router::new()
        .route("/{event_id}/comments", get(list_comments))
        .with_state(Arc::new(comments));

    events.merge(comments)
}

/// Routes for `/compilations`
pub fn public_compilations_router(service: CompilationService) -> Router {
    Router::new()
        .route("/", get(list_compilations))
        .route("/{comp_id}", get(get_compilation))
        .with_state(Arc::new(service))
}

/// Search published events
#[utoipa::path(
    get,
    path = "/events",
    tag = PUBLIC_TAG,
    params(PublicEventQuery, PageParams),
    responses(
        (status = 200, description = "Matching published events", body = Vec<EventShort>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events(
    State(service): State<Arc<EventService>>,
    ClientIp(ip): ClientIp,
    ValidatedQuery(query): ValidatedQuery<PublicEventQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> EventResult<Json<Vec<EventShort>>> {
    let events = service.get_public_events(query, page, &ip).await?;
    Ok(Json(events))
}

/// A published event
#[utoipa::path(
    get,
    path = "/events/{event_id}",
    tag = PUBLIC_TAG,
    params(("event_id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = EventFull),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event(
    State(service): State<Arc<EventService>>,
    ClientIp(ip): ClientIp,
    ValidPath(event_id): ValidPath<i64>,
) -> EventResult<Json<EventFull>> {
    let event = service.get_public_event(event_id, &ip).await?;
    Ok(Json(event))
}

/// Published comments, newest first
#[utoipa::path(
    get,
    path = "/events/{event_id}/comments",
    tag = PUBLIC_TAG,
    params(("event_id" = i64, Path, description = "Event ID"), PageParams),
    responses(
        (status = 200, description = "Comments", body = Vec<CommentDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_comments(
    State(service): State<Arc<CommentService>>,
    ValidPath(event_id): ValidPath<i64>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> EventResult<Json<Vec<CommentDto>>> {
    let comments = service.published_comments(event_id, page).await?;
    Ok(Json(comments))
}

/// Compilations, optionally only pinned ones
#[utoipa::path(
    get,
    path = "/compilations",
    tag = PUBLIC_TAG,
    params(CompilationQuery, PageParams),
    responses(
        (status = 200, description = "Compilations ordered by id", body = Vec<CompilationDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_compilations(
    State(service): State<Arc<CompilationService>>,
    ValidatedQuery(query): ValidatedQuery<CompilationQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> EventResult<Json<Vec<CompilationDto>>> {
    let compilations = service.list(query, page).await?;
    Ok(Json(compilations))
}

/// A compilation
#[utoipa::path(
    get,
    path = "/compilations/{comp_id}",
    tag = PUBLIC_TAG,
    params(("comp_id" = i64, Path, description = "Compilation ID")),
    responses(
        (status = 200, description = "Compilation found", body = CompilationDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_compilation(
    State(service): State<Arc<CompilationService>>,
    ValidPath(comp_id): ValidPath<i64>,
) -> EventResult<Json<CompilationDto>> {
    let compilation = service.get(comp_id).await?;
    Ok(Json(compilation))
}
