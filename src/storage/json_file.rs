use crate::domain::contact::{Contact, NewContact, timestamp_now};
use crate::storage::{ContactStore, Result, StoreError};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::UtcOffset;
use tokio::sync::Mutex;

/// Contact store backed by a single pretty-printed JSON array on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    utc_offset: UtcOffset,
    // Held across every read-modify-write of the file.
    lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, utc_offset: UtcOffset) -> Self {
        Self { path: path.into(), utc_offset, lock: Mutex::new(()) }
    }

    /// Opens the store, writing an empty collection if the file does not exist yet.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the file or its parent directory cannot be created.
    pub async fn open(path: impl Into<PathBuf>, utc_offset: UtcOffset) -> Result<Self> {
        let store = Self::new(path, utc_offset);

        let exists = tokio::fs::try_exists(&store.path).await.map_err(|e| store.io_error(e))?;
        if !exists {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| store.io_error(e))?;
            }
            store.write_all(&[]).await?;
            tracing::info!(path = %store.path.display(), "Created empty contact store");
        }

        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_all(&self) -> Result<Vec<Contact>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    async fn write_all(&self, contacts: &[Contact]) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(contacts).map_err(StoreError::Encode)?;

        // Stage next to the target so the rename stays on one filesystem.
        let staging = self.staging_path();
        let staged = match tokio::fs::write(&staging, encoded).await {
            Ok(()) => tokio::fs::rename(&staging, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = staged {
            // A partially written staging file must not outlive the failed save.
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(path = %staging.display(), error = %cleanup, "Failed to remove staging file");
            }
            return Err(self.io_error(e));
        }

        Ok(())
    }
}

#[async_trait]
impl ContactStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Contact>> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn append(&self, candidate: NewContact) -> Result<Contact> {
        let _guard = self.lock.lock().await;

        let mut contacts = self.read_all().await?;
        let id = contacts.len() as u64 + 1;
        let contact = candidate.into_contact(id, timestamp_now(self.utc_offset)?);

        contacts.push(contact.clone());
        self.write_all(&contacts).await?;

        tracing::debug!(contact_id = id, total = contacts.len(), "Contact persisted");
        Ok(contact)
    }

    async fn save(&self, contacts: &[Contact]) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write_all(contacts).await
    }
}
