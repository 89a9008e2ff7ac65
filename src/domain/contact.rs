use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// Status given to every contact at submission.
pub const STATUS_NEW: &str = "new";

/// A message submitted through the contact form, as persisted.
///
/// Records are rewritten in full on every append, so values this service never
/// produces (other statuses, keys added by hand) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// ISO-8601 submission time. Stored verbatim so older files round-trip.
    pub timestamp: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// A validated submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) message: String,
}

impl NewContact {
    /// Trims every field and rejects the first one that is absent or blank.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingField` naming the offending field,
    /// checked in the order name, email, message.
    pub fn new(name: Option<&str>, email: Option<&str>, message: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name)?,
            email: required("email", email)?,
            message: required("message", message)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Finalizes the submission with its assigned id and submission time.
    #[must_use]
    pub fn into_contact(self, id: u64, timestamp: String) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            message: self.message,
            timestamp,
            status: STATUS_NEW.to_string(),
            extra: Map::new(),
        }
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Current time rendered as RFC 3339 in the given offset.
///
/// # Errors
/// Returns `time::error::Format` if the timestamp cannot be rendered.
pub fn timestamp_now(offset: UtcOffset) -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().to_offset(offset).format(&Rfc3339)
}
