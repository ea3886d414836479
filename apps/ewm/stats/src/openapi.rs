use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "EWM Stats API",
        version = "0.1.0",
        description = "Endpoint hit recording and view aggregation"
    )
)]
struct InfoDoc;

/// Stats routes live at the root, so their document is merged rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = InfoDoc::openapi();
        doc.merge(domain_stats::handlers::ApiDoc::openapi());
        doc
    }
}
