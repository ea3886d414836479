use axum::Router;
use domain_categories::{CategoryService, PgCategoryRepository};
use domain_events::{
    CommentService, CompilationService, EventAssembler, EventCategoryUsage, EventService,
    PgCommentRepository, PgCompilationRepository, PgEventStore, RequestService, handlers,
};
use domain_users::{PgUserRepository, UserService};
use std::sync::Arc;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Every domain router has its state applied here, so the result is stateless.
pub fn routes(state: &crate::state::AppState) -> Router {
    let db = &state.db;

    let users = Arc::new(PgUserRepository::new(db.clone()));
    let categories = Arc::new(PgCategoryRepository::new(db.clone()));
    let store = Arc::new(PgEventStore::new(db.clone()));

    let category_service = CategoryService::new(
        PgCategoryRepository::new(db.clone()),
        Arc::new(EventCategoryUsage::new(store.clone())),
    );

    let events = EventService::new(
        store.clone(),
        store.clone(),
        users.clone(),
        categories.clone(),
        state.views.clone(),
    );
    let requests = RequestService::new(store.clone(), users.clone());
    let comments = CommentService::new(
        Arc::new(PgCommentRepository::new(db.clone())),
        store.clone(),
        users.clone(),
    );
    let compilations = CompilationService::new(
        Arc::new(PgCompilationRepository::new(db.clone())),
        store.clone(),
        EventAssembler::new(store, users, categories, state.views.clone()),
    );

    Router::new()
        .nest(
            "/admin/users",
            domain_users::handlers::router(UserService::new(PgUserRepository::new(db.clone()))),
        )
        .nest(
            "/admin/categories",
            domain_categories::handlers::admin_router(category_service.clone()),
        )
        .nest("/admin/events", handlers::admin_events_router(events.clone()))
        .nest(
            "/admin/compilations",
            handlers::admin_compilations_router(compilations.clone()),
        )
        .nest("/admin/comments", handlers::admin_comments_router(comments.clone()))
        .nest(
            "/users",
            handlers::private_router(events.clone(), requests, comments.clone()),
        )
        .nest("/categories", domain_categories::handlers::public_router(category_service))
        .nest("/events", handlers::public_events_router(events, comments))
        .nest("/compilations", handlers::public_compilations_router(compilations))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
