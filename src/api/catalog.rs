use crate::api::schemas::catalog::{CoursesResponse, SearchParams, SearchResponse};
use crate::domain::catalog::{self, COURSES};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
    response::IntoResponse,
};

pub async fn list_courses() -> impl IntoResponse {
    Json(CoursesResponse { success: true, courses: &COURSES })
}

/// Searches the site content.
///
/// # Errors
/// Returns `AppError::MissingQuery` if `q` is absent or empty, and
/// `AppError::BadRequest` if the query string cannot be decoded.
pub async fn search(
    pairs: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(pairs) = pairs.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let params = SearchParams::from_pairs(pairs);

    let query = params.q.filter(|q| !q.is_empty()).ok_or(AppError::MissingQuery)?.to_lowercase();
    let results = catalog::search(&query);

    tracing::debug!(query = %query, count = results.len(), "Search completed");
    Ok(Json(SearchResponse::new(query, results)))
}
