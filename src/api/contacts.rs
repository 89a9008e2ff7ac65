use crate::api::AppState;
use crate::api::schemas::contacts::{ListContactsResponse, SubmitContactRequest, SubmitContactResponse};
use crate::domain::contact::NewContact;
use crate::error::{AppError, Result};
use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};

/// Accepts a contact form submission.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not a JSON object.
/// Returns `AppError::Validation` if a required field is missing or blank.
/// Returns `AppError::Store` if the submission cannot be persisted.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let candidate = NewContact::try_from(req)?;

    let contact = state.contact_service.submit(candidate).await?;

    Ok(Json(SubmitContactResponse::from(&contact)))
}

/// Lists every submitted contact.
///
/// # Errors
/// Returns `AppError::ContactsUnavailable` if the store cannot be read.
pub async fn list_contacts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let contacts = state.contact_service.list().await?;
    Ok(Json(ListContactsResponse::from(contacts)))
}
