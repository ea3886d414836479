use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    PageParams, ValidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

pub const ADMIN_TAG: &str = "Admin: categories";
pub const PUBLIC_TAG: &str = "Public: categories";

#[derive(OpenApi)]
#[openapi(
    paths(create_category, update_category, delete_category),
    components(
        schemas(Category, NewCategory, UpdateCategory),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = ADMIN_TAG, description = "Category administration"))
)]
pub struct AdminApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, get_category),
    components(schemas(Category), responses(NotFoundResponse, InternalServerErrorResponse)),
    tags((name = PUBLIC_TAG, description = "Category browsing"))
)]
pub struct PublicApiDoc;

/// Routes for `/admin/categories`
pub fn admin_router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", post(create_category::<R>))
        .route(
            "/{cat_id}",
            patch(update_category::<R>).delete(delete_category::<R>),
        )
        .with_state(Arc::new(service))
}

/// Routes for `/categories`
pub fn public_router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories::<R>))
        .route("/{cat_id}", get(get_category::<R>))
        .with_state(Arc::new(service))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = ADMIN_TAG,
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<NewCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category
#[utoipa::path(
    patch,
    path = "/{cat_id}",
    tag = ADMIN_TAG,
    params(("cat_id" = i64, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidPath(cat_id): ValidPath<i64>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<Json<Category>> {
    let category = service.update_category(cat_id, input).await?;
    Ok(Json(category))
}

/// Delete a category without events
#[utoipa::path(
    delete,
    path = "/{cat_id}",
    tag = ADMIN_TAG,
    params(("cat_id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidPath(cat_id): ValidPath<i64>,
) -> CategoryResult<StatusCode> {
    service.delete_category(cat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List categories
#[utoipa::path(
    get,
    path = "",
    tag = PUBLIC_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Categories ordered by id", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> CategoryResult<Json<Vec<Category>>> {
    let categories = service.list_categories(page).await?;
    Ok(Json(categories))
}

/// Get a category
#[utoipa::path(
    get,
    path = "/{cat_id}",
    tag = PUBLIC_TAG,
    params(("cat_id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidPath(cat_id): ValidPath<i64>,
) -> CategoryResult<Json<Category>> {
    let category = service.get_category(cat_id).await?;
    Ok(Json(category))
}
