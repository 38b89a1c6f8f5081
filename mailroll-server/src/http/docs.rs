//! OpenAPI document and Swagger UI

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::routes::{emails, export, health};
use crate::models::{Email, EmailInput};

pub const SWAGGER_UI_PATH: &str = "/swagger";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        emails::list_emails,
        emails::get_email,
        emails::create_email,
        emails::update_email,
        emails::delete_email,
        export::export_csv,
        health::health,
        health::test_connect,
    ),
    components(schemas(Email, EmailInput)),
    info(
        title = "EmailAPI v1",
        description = "Registry of email addresses with CSV export",
        version = "v1"
    ),
    tags(
        (name = "Emails", description = "Email CRUD endpoints"),
        (name = "Export", description = "Bulk export"),
        (name = "Health", description = "Liveness and connectivity probes")
    )
)]
pub struct EmailApiDoc;

/// Swagger UI plus the JSON document it renders.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, EmailApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = EmailApiDoc::openapi();
        for path in ["/emails", "/emails/{id}", "/export", "/health", "/test-connect"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert_eq!(doc.info.title, "EmailAPI v1");
    }
}
