use crate::domain::contact::{Contact, NewContact, ValidationError};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`. Fields are optional so that a missing one is
/// reported by name instead of as a generic decoding failure.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl TryFrom<SubmitContactRequest> for NewContact {
    type Error = ValidationError;

    fn try_from(req: SubmitContactRequest) -> Result<Self, Self::Error> {
        Self::new(req.name.as_deref(), req.email.as_deref(), req.message.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub contact_id: u64,
}

impl From<&Contact> for SubmitContactResponse {
    fn from(contact: &Contact) -> Self {
        Self { success: true, message: "Contact form submitted successfully", contact_id: contact.id }
    }
}

#[derive(Debug, Serialize)]
pub struct ListContactsResponse {
    pub success: bool,
    pub count: usize,
    pub contacts: Vec<Contact>,
}

impl From<Vec<Contact>> for ListContactsResponse {
    fn from(contacts: Vec<Contact>) -> Self {
        Self { success: true, count: contacts.len(), contacts }
    }
}
