use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    PageParams, ValidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::PRIVATE_TAG;
use crate::comment_service::CommentService;
use crate::error::EventResult;
use crate::models::{
    CommentDto, EventFull, EventShort, Location, NewComment, NewEvent, NewRequestQuery,
    ParticipationRequest, StatusUpdateRequest, StatusUpdateResult, UpdateEventUserRequest,
};
use crate::request_service::RequestService;
use crate::service::EventService;

#[derive(OpenApi)]
#[openapi(
    paths(
        add_event,
        list_user_events,
        get_user_event,
        update_user_event,
        list_event_requests,
        change_request_status,
        add_request,
        list_user_requests,
        cancel_request,
        add_comment,
        update_comment,
        delete_comment
    ),
    components(
        schemas(
            NewEvent,
            Location,
            EventFull,
            EventShort,
            UpdateEventUserRequest,
            ParticipationRequest,
            StatusUpdateRequest,
            StatusUpdateResult,
            NewComment,
            CommentDto
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = PRIVATE_TAG, description = "What a user does with own events, requests and comments"))
)]
pub struct PrivateApiDoc;

/// Routes for `/users`
pub fn private_router(
    events: EventService,
    requests: RequestService,
    comments: CommentService,
) -> Router {
    let events = Router::new()
        .route("/{user_id}/events", get(list_user_events).post(add_event))
        .route(
            "/{user_id}/events/{event_id}",
            get(get_user_event).patch(update_user_event),
        )
        .route(
            "/{user_id}/events/{event_id}/requests",
            get(list_event_requests).patch(change_request_status),
        )
        .with_state(Arc::new(events));

    let requests = Router::new()
        .route("/{user_id}/requests", get(list_user_requests).post(add_request))
        .route("/{user_id}/requests/{request_id}/cancel", patch(cancel_request))
        .with_state(Arc::new(requests));

    let comments = Router::new()
        .route(
            "/{user_id}/events/{event_id}/comments",
            axum::routing::post(add_comment),
        )
        .route(
            "/{user_id}/comments/{comment_id}",
            patch(update_comment).delete(delete_comment),
        )
        .with_state(Arc::new(comments));

    events.merge(requests).merge(comments)
}

/// Create an event
#[utoipa::path(
    post,
    path = "/{user_id}/events",
    tag = PRIVATE_TAG,
    params(("user_id" = i64, Path, description = "Initiator ID")),
    request_body = NewEvent,
    responses(
        (status = 201, description = "Event created in PENDING state", body = EventFull),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_event(
    State(service): State<Arc<EventService>>,
    ValidPath(user_id): ValidPath<i64>,
    ValidatedJson(draft): ValidatedJson<NewEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.add_event(user_id, draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Events created by a user
#[utoipa::path(
    get,
    path = "/{user_id}/events",
    tag = PRIVATE_TAG,
    params(("user_id" = i64, Path, description = "Initiator ID"), PageParams),
    responses(
        (status = 200, description = "Events ordered by id", body = Vec<EventShort>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_user_events(
    State(service): State<Arc<EventService>>,
    ValidPath(user_id): ValidPath<i64>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> EventResult<Json<Vec<EventShort>>> {
    let events = service.list_user_events(user_id, page).await?;
    Ok(Json(events))
}

/// One of the user's events
#[utoipa::path(
    get,
    path = "/{user_id}/events/{event_id}",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Initiator ID"),
        ("event_id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventFull),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_event(
    State(service): State<Arc<EventService>>,
    ValidPath((user_id, event_id)): ValidPath<(i64, i64)>,
) -> EventResult<Json<EventFull>> {
    let event = service.get_user_event(user_id, event_id).await?;
    Ok(Json(event))
}

/// Edit an unpublished event
#[utoipa::path(
    patch,
    path = "/{user_id}/events/{event_id}",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Initiator ID"),
        ("event_id" = i64, Path, description = "Event ID")
    ),
    request_body = UpdateEventUserRequest,
    responses(
        (status = 200, description = "Event updated", body = EventFull),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user_event(
    State(service): State<Arc<EventService>>,
    ValidPath((user_id, event_id)): ValidPath<(i64, i64)>,
    ValidatedJson(patch): ValidatedJson<UpdateEventUserRequest>,
) -> EventResult<Json<EventFull>> {
    let event = service.update_event_by_user(user_id, event_id, patch).await?;
    Ok(Json(event))
}

/// Requests to take part in the user's event
#[utoipa::path(
    get,
    path = "/{user_id}/events/{event_id}/requests",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Initiator ID"),
        ("event_id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Requests ordered by id", body = Vec<ParticipationRequest>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_event_requests(
    State(service): State<Arc<EventService>>,
    ValidPath((user_id, event_id)): ValidPath<(i64, i64)>,
) -> EventResult<Json<Vec<ParticipationRequest>>> {
    let requests = service.list_event_requests(user_id, event_id).await?;
    Ok(Json(requests))
}

/// Confirm or reject pending requests
#[utoipa::path(
    patch,
    path = "/{user_id}/events/{event_id}/requests",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Initiator ID"),
        ("event_id" = i64, Path, description = "Event ID")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Requests whose status changed", body = StatusUpdateResult),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn change_request_status(
    State(service): State<Arc<EventService>>,
    ValidPath((user_id, event_id)): ValidPath<(i64, i64)>,
    ValidatedJson(update): ValidatedJson<StatusUpdateRequest>,
) -> EventResult<Json<StatusUpdateResult>> {
    let result = service.change_request_status(user_id, event_id, update).await?;
    Ok(Json(result))
}

/// Ask to take part in an event
#[utoipa::path(
    post,
    path = "/{user_id}/requests",
    tag = PRIVATE_TAG,
    params(("user_id" = i64, Path, description = "Requester ID"), NewRequestQuery),
    responses(
        (status = 201, description = "Request created", body = ParticipationRequest),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_request(
    State(service): State<Arc<RequestService>>,
    ValidPath(user_id): ValidPath<i64>,
    ValidatedQuery(query): ValidatedQuery<NewRequestQuery>,
) -> EventResult<impl IntoResponse> {
    let request = service.add_request(user_id, query.event_id).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// The user's requests to other people's events
#[utoipa::path(
    get,
    path = "/{user_id}/requests",
    tag = PRIVATE_TAG,
    params(("user_id" = i64, Path, description = "Requester ID")),
    responses(
        (status = 200, description = "Requests ordered by id", body = Vec<ParticipationRequest>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_user_requests(
    State(service): State<Arc<RequestService>>,
    ValidPath(user_id): ValidPath<i64>,
) -> EventResult<Json<Vec<ParticipationRequest>>> {
    let requests = service.list_user_requests(user_id).await?;
    Ok(Json(requests))
}

/// Withdraw a request
#[utoipa::path(
    patch,
    path = "/{user_id}/requests/{request_id}/cancel",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Requester ID"),
        ("request_id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request canceled", body = ParticipationRequest),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn cancel_request(
    State(service): State<Arc<RequestService>>,
    ValidPath((user_id, request_id)): ValidPath<(i64, i64)>,
) -> EventResult<Json<ParticipationRequest>> {
    let request = service.cancel_request(user_id, request_id).await?;
    Ok(Json(request))
}

/// Comment on a published event
#[utoipa::path(
    post,
    path = "/{user_id}/events/{event_id}/comments",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Author ID"),
        ("event_id" = i64, Path, description = "Event ID")
    ),
    request_body = NewComment,
    responses(
        (status = 201, description = "Comment awaiting moderation", body = CommentDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_comment(
    State(service): State<Arc<CommentService>>,
    ValidPath((user_id, event_id)): ValidPath<(i64, i64)>,
    ValidatedJson(input): ValidatedJson<NewComment>,
) -> EventResult<impl IntoResponse> {
    let comment = service.add_comment(user_id, event_id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Edit a comment that is still pending
#[utoipa::path(
    patch,
    path = "/{user_id}/comments/{comment_id}",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Author ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = NewComment,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_comment(
    State(service): State<Arc<CommentService>>,
    ValidPath((user_id, comment_id)): ValidPath<(i64, i64)>,
    ValidatedJson(input): ValidatedJson<NewComment>,
) -> EventResult<Json<CommentDto>> {
    let comment = service.update_own_comment(user_id, comment_id, input).await?;
    Ok(Json(comment))
}

/// Delete own comment
#[utoipa::path(
    delete,
    path = "/{user_id}/comments/{comment_id}",
    tag = PRIVATE_TAG,
    params(
        ("user_id" = i64, Path, description = "Author ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_comment(
    State(service): State<Arc<CommentService>>,
    ValidPath((user_id, comment_id)): ValidPath<(i64, i64)>,
) -> EventResult<StatusCode> {
    service.delete_own_comment(user_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
