#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::api::{AppState, MgmtState};
use crate::config::Config;
use crate::services::contact_service::ContactService;
use crate::services::health_service::HealthService;
use crate::storage::{ContactStore, JsonFileStore};
use std::sync::Arc;
use time::UtcOffset;
use tokio::sync::watch;

/// Fully wired application: the public router and the management router.
#[derive(Debug)]
pub struct App {
    pub app_router: axum::Router,
    pub mgmt_router: axum::Router,
    pub store: Arc<dyn ContactStore>,
}

#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    utc_offset: UtcOffset,
    store: Option<Arc<dyn ContactStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, utc_offset: UtcOffset::UTC, store: None }
    }

    /// Offset used for submission timestamps.
    #[must_use]
    pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Uses the given store instead of opening the configured data file.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ContactStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Opens the contact store (unless one was supplied) and wires the routers.
    ///
    /// # Errors
    /// Returns an error if the data file cannot be created.
    pub async fn build(self) -> anyhow::Result<App> {
        let store: Arc<dyn ContactStore> = match self.store {
            Some(store) => store,
            None => Arc::new(JsonFileStore::open(&self.config.data_file, self.utc_offset).await?),
        };

        let contact_service = ContactService::new(Arc::clone(&store));
        let health_service = HealthService::new(Arc::clone(&store), self.config.health.clone());

        Ok(App {
            app_router: api::app_router(AppState { contact_service }),
            mgmt_router: api::mgmt_router(MgmtState { health_service }),
            store,
        })
    }
}

/// Routes panics through `tracing` before the default hook runs.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Server panicked");
        default_hook(info);
    }));
}

/// Flips `shutdown_tx` to `true` on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
