use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_helpers::{
    PageParams, ValidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{NewUser, User, UserListQuery};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "Admin: users";

#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, delete_user),
    components(
        schemas(User, NewUser),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "User administration"))
)]
pub struct ApiDoc;

/// Admin user routes, meant to be nested under `/admin/users`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users::<R>).post(create_user::<R>))
        .route("/{user_id}", delete(delete_user::<R>))
        .with_state(shared_service)
}

/// List users, optionally restricted to `ids`
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(UserListQuery, PageParams),
    responses(
        (status = 200, description = "Users ordered by id", body = Vec<User>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users(&query.ids, page).await?;
    Ok(Json(users))
}

/// Register a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidPath(user_id): ValidPath<i64>,
) -> UserResult<StatusCode> {
    service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
