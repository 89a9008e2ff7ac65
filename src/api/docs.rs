use axum::{http::header, response::IntoResponse};

const OPENAPI_TEMPLATE: &str = include_str!("../../openapi.yaml");

/// The bundled `OpenAPI` document stamped with the running crate version.
fn versioned_document() -> String {
    OPENAPI_TEMPLATE.replacen("version: 0.0.0", concat!("version: ", env!("CARGO_PKG_VERSION")), 1)
}

/// `GET /openapi.yaml`
pub async fn openapi_yaml() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/yaml")], versioned_document())
}
