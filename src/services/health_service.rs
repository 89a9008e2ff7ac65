use crate::config::HealthConfig;
use crate::storage::ContactStore;
use crate::telemetry::METER_NAME;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) status: Gauge<i64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter(METER_NAME);
        Self {
            status: meter
                .i64_gauge("itsite_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn ContactStore>,
    config: HealthConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>, config: HealthConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Checks that the contact store can be read and parsed.
    ///
    /// # Errors
    /// Returns a string describing the failure if the store is unreadable or too slow.
    pub async fn check_store(&self) -> Result<(), String> {
        let store_timeout = Duration::from_millis(self.config.store_timeout_ms);

        let result = match timeout(store_timeout, self.store.load()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(format!("Contact store check failed: {e}")),
            Err(_) => Err("Contact store check timed out".to_string()),
        };

        let value = i64::from(result.is_ok());
        self.metrics.status.record(value, &[KeyValue::new("component", "store")]);
        result
    }
}
