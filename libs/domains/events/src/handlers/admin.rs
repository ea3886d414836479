use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_helpers::{
    PageParams, ValidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::{ADMIN_COMMENTS_TAG, ADMIN_COMPILATIONS_TAG, ADMIN_EVENTS_TAG};
use crate::comment_service::CommentService;
use crate::compilation_service::CompilationService;
use crate::error::EventResult;
use crate::models::{
    AdminEventQuery, CommentDto, CompilationDto, EventFull, NewCompilation, UpdateCompilation,
    UpdateEventAdminRequest,
};
use crate::service::EventService;

#[derive(OpenApi)]
#[openapi(
    paths(
        search_events,
        moderate_event,
        create_compilation,
        update_compilation,
        delete_compilation,
        publish_comment,
        reject_comment,
        delete_comment
    ),
    components(
        schemas(
            EventFull,
            UpdateEventAdminRequest,
            NewCompilation,
            UpdateCompilation,
            CompilationDto,
            CommentDto
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ADMIN_EVENTS_TAG, description = "Event search and moderation"),
        (name = ADMIN_COMPILATIONS_TAG, description = "Compilation administration"),
        (name = ADMIN_COMMENTS_TAG, description = "Comment moderation")
    )
)]
pub struct AdminApiDoc;

/// Routes for `/admin/events`
pub fn admin_events_router(service: EventService) -> Router {
    Router::new()
        .route("/", get(search_events))
        .route("/{event_id}", patch(moderate_event))
        .with_state(Arc::new(service))
}

/// Routes for `/admin/compilations`
pub fn admin_compilations_router(service: CompilationService) -> Router {
    Router::new()
        .route("/", post(create_compilation))
        .route(
            "/{comp_id}",
            patch(update_compilation).delete(delete_compilation),
        )
        .with_state(Arc::new(service))
}

/// Routes for `/admin/comments`
pub fn admin_comments_router(service: CommentService) -> Router {
    Router::new()
        .route("/{comment_id}", delete(delete_comment))
        .route("/{comment_id}/publish", patch(publish_comment))
        .route("/{comment_id}/reject", patch(reject_comment))
        .with_state(Arc::new(service))
}

/// Search events with full details
#[utoipa::path(
    get,
    path = "/events",
    tag = ADMIN_EVENTS_TAG,
    params(AdminEventQuery, PageParams),
    responses(
        (status = 200, description = "Matching events ordered by id", body = Vec<EventFull>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_events(
    State(service): State<Arc<EventService>>,
    ValidatedQuery(query): ValidatedQuery<AdminEventQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> EventResult<Json<Vec<EventFull>>> {
    let events = service.search_admin_events(query, page).await?;
    Ok(Json(events))
}

/// Edit, publish or reject an event
#[utoipa::path(
    patch,
    path = "/events/{event_id}",
    tag = ADMIN_EVENTS_TAG,
    params(("event_id" = i64, Path, description = "Event ID")),
    request_body = UpdateEventAdminRequest,
    responses(
        (status = 200, description = "Event updated", body = EventFull),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn moderate_event(
    State(service): State<Arc<EventService>>,
    ValidPath(event_id): ValidPath<i64>,
    ValidatedJson(patch): ValidatedJson<UpdateEventAdminRequest>,
) -> EventResult<Json<EventFull>> {
    let event = service.update_event_by_admin(event_id, patch).await?;
    Ok(Json(event))
}

/// Create a compilation
#[utoipa::path(
    post,
    path = "/compilations",
    tag = ADMIN_COMPILATIONS_TAG,
    request_body = NewCompilation,
    responses(
        (status = 201, description = "Compilation created", body = CompilationDto),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_compilation(
    State(service): State<Arc<CompilationService>>,
    ValidatedJson(input): ValidatedJson<NewCompilation>,
) -> EventResult<impl IntoResponse> {
    let compilation = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(compilation)))
}

/// Change title, pinned flag or events of a compilation
#[utoipa::path(
    patch,
    path = "/compilations/{comp_id}",
    tag = ADMIN_COMPILATIONS_TAG,
    params(("comp_id" = i64, Path, description = "Compilation ID")),
    request_body = UpdateCompilation,
    responses(
        (status = 200, description = "Compilation updated", body = CompilationDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_compilation(
    State(service): State<Arc<CompilationService>>,
    ValidPath(comp_id): ValidPath<i64>,
    ValidatedJson(patch): ValidatedJson<UpdateCompilation>,
) -> EventResult<Json<CompilationDto>> {
    let compilation = service.update(comp_id, patch).await?;
    Ok(Json(compilation))
}

/// Delete a compilation
#[utoipa::path(
    delete,
    path = "/compilations/{comp_id}",
    tag = ADMIN_COMPILATIONS_TAG,
    params(("comp_id" = i64, Path, description = "Compilation ID")),
    responses(
        (status = 204, description = "Compilation deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_compilation(
    State(service): State<Arc<CompilationService>>,
    ValidPath(comp_id): ValidPath<i64>,
) -> EventResult<StatusCode> {
    service.delete(comp_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Make a comment visible
#[utoipa::path(
    patch,
    path = "/comments/{comment_id}/publish",
    tag = ADMIN_COMMENTS_TAG,
    params(("comment_id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment published", body = CommentDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn publish_comment(
    State(service): State<Arc<CommentService>>,
    ValidPath(comment_id): ValidPath<i64>,
) -> EventResult<Json<CommentDto>> {
    let comment = service.publish(comment_id).await?;
    Ok(Json(comment))
}

/// Reject a comment
#[utoipa::path(
    patch,
    path = "/comments/{comment_id}/reject",
    tag = ADMIN_COMMENTS_TAG,
    params(("comment_id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment rejected", body = CommentDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reject_comment(
    State(service): State<Arc<CommentService>>,
    ValidPath(comment_id): ValidPath<i64>,
) -> EventResult<Json<CommentDto>> {
    let comment = service.reject(comment_id).await?;
    Ok(Json(comment))
}

/// Remove any comment
#[utoipa::path(
    delete,
    path = "/comments/{comment_id}",
    tag = ADMIN_COMMENTS_TAG,
    params(("comment_id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_comment(
    State(service): State<Arc<CommentService>>,
    ValidPath(comment_id): ValidPath<i64>,
) -> EventResult<StatusCode> {
    service.delete(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
