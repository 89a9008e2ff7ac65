use crate::domain::contact::{Contact, NewContact};
use crate::error::{AppError, Result};
use crate::storage::ContactStore;
use crate::telemetry::METER_NAME;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) submitted_total: Counter<u64>,
    pub(crate) store_failures_total: Counter<u64>,
    pub(crate) listed_count: Histogram<u64>,
}

impl Metrics {
    fn new(meter: &Meter) -> Self {
        Self {
            submitted_total: meter
                .u64_counter("itsite_contacts_submitted_total")
                .with_description("Contact submissions by outcome")
                .build(),
            store_failures_total: meter
                .u64_counter("itsite_contact_store_failures_total")
                .with_description("Contact store operations that failed")
                .build(),
            listed_count: meter
                .u64_histogram("itsite_contacts_listed_count")
                .with_description("Number of contacts returned by a single listing")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    metrics: Metrics,
}

impl ContactService {
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self::with_meter(store, &global::meter(METER_NAME))
    }

    pub(crate) fn with_meter(store: Arc<dyn ContactStore>, meter: &Meter) -> Self {
        Self { store, metrics: Metrics::new(meter) }
    }

    /// Persists a validated submission and returns it with its assigned id.
    ///
    /// # Errors
    /// Returns `AppError::Store` if the contact cannot be persisted.
    #[tracing::instrument(err(level = "warn"), skip(self, candidate))]
    pub async fn submit(&self, candidate: NewContact) -> Result<Contact> {
        let contact = match self.store.append(candidate).await {
            Ok(contact) => {
                self.metrics.submitted_total.add(1, &[KeyValue::new("status", "success")]);
                contact
            }
            Err(e) => {
                self.metrics.submitted_total.add(1, &[KeyValue::new("status", "failure")]);
                self.metrics.store_failures_total.add(1, &[KeyValue::new("operation", "append")]);
                return Err(e.into());
            }
        };

        tracing::info!(
            contact_id = contact.id,
            name = %contact.name,
            email = %contact.email,
            "New contact received"
        );
        Ok(contact)
    }

    /// Returns every stored contact in submission order.
    ///
    /// # Errors
    /// Returns `AppError::ContactsUnavailable` if the store cannot be read.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list(&self) -> Result<Vec<Contact>> {
        let contacts = self.store.load().await.map_err(|e| {
            self.metrics.store_failures_total.add(1, &[KeyValue::new("operation", "load")]);
            AppError::ContactsUnavailable(e)
        })?;
        self.metrics.listed_count.record(contacts.len() as u64, &[]);
        Ok(contacts)
    }
}
