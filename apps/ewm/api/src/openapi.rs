use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Explore With Me API",
        version = "0.1.0",
        description = "Events, participation requests, compilations and comments"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/admin/users", api = domain_users::handlers::ApiDoc),
        (path = "/admin/categories", api = domain_categories::handlers::AdminApiDoc),
        (path = "/categories", api = domain_categories::handlers::PublicApiDoc),
        (path = "/admin", api = domain_events::handlers::AdminApiDoc),
        (path = "/users", api = domain_events::handlers::PrivateApiDoc)
    )
)]
struct NestedDoc;

/// Full document: the nested domain docs plus the public event routes,
/// whose paths already carry their root prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = NestedDoc::openapi();
        doc.merge(domain_events::handlers::PublicApiDoc::openapi());
        doc
    }
}
