use utoipa::OpenApi;

/// Aggregated OpenAPI document: events plus auth.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = domain_events::ApiDoc::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc
    }
}
