use axum::response::{Html, IntoResponse};

/// Static landing page listing the available endpoints.
pub async fn index() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}
