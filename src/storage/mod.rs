use crate::domain::contact::{Contact, NewContact};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub mod json_file;

pub use json_file::JsonFileStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on contact store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Contact store {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode contacts: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to format submission timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence for submitted contacts.
///
/// Implementations serialize all three operations against each other, so an
/// `append` never races another `append` or `save`.
#[async_trait]
pub trait ContactStore: Send + Sync + std::fmt::Debug + 'static {
    /// Reads the whole collection. A store that was never written is empty.
    async fn load(&self) -> Result<Vec<Contact>>;

    /// Assigns the next id, the submission time and the `new` status, then
    /// persists the extended collection.
    async fn append(&self, candidate: NewContact) -> Result<Contact>;

    /// Replaces the whole collection.
    async fn save(&self, contacts: &[Contact]) -> Result<()>;
}
