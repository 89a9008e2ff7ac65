#![allow(dead_code)]
use async_trait::async_trait;
use itsite_server::AppBuilder;
use itsite_server::config::{Config, HealthConfig, LogFormat, ServerConfig, TelemetryConfig};
use itsite_server::domain::contact::{Contact, NewContact};
use itsite_server::storage::{ContactStore, StoreError};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::watch;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("itsite_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config(data_file: PathBuf) -> Config {
    Config {
        data_file,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // 0 means let OS choose
            mgmt_port: 0,
            shutdown_timeout_secs: 1,
        },
        telemetry: TelemetryConfig {
            log_level: "debug".to_string(),
            log_format: LogFormat::Text,
            otlp_endpoint: None,
        },
        health: HealthConfig { store_timeout_ms: 1000 },
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
    pub store: Arc<dyn ContactStore>,
    pub shutdown_tx: watch::Sender<bool>,
    // Keeps the data directory alive for the lifetime of the app.
    _data_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::start(None).await
    }

    pub async fn spawn_with_store(store: Arc<dyn ContactStore>) -> Self {
        Self::start(Some(store)).await
    }

    async fn start(store: Option<Arc<dyn ContactStore>>) -> Self {
        setup_tracing();

        let data_dir = tempfile::tempdir().expect("Failed to create data dir");
        let config = get_test_config(data_dir.path().join("contacts.json"));

        let mut builder = AppBuilder::new(config.clone());
        if let Some(store) = store {
            builder = builder.with_store(store);
        }
        let app = builder.build().await.expect("Failed to build app");

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut api_rx = shutdown_rx.clone();
        tokio::spawn(async move {
            axum::serve(api_listener, app.app_router)
                .with_graceful_shutdown(async move {
                    let _ = api_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        let mut mgmt_rx = shutdown_rx;
        tokio::spawn(async move {
            axum::serve(mgmt_listener, app.mgmt_router)
                .with_graceful_shutdown(async move {
                    let _ = mgmt_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        Self {
            server_url,
            mgmt_url,
            client: reqwest::Client::new(),
            config,
            store: app.store,
            shutdown_tx,
            _data_dir: data_dir,
        }
    }

    pub fn data_file(&self) -> &std::path::Path {
        &self.config.data_file
    }

    pub async fn submit(&self, body: &Value) -> reqwest::Response {
        self.client.post(format!("{}/api/contact", self.server_url)).json(body).send().await.unwrap()
    }

    /// Submits a valid contact and returns the assigned id.
    pub async fn submit_contact(&self, name: &str) -> u64 {
        let resp = self
            .submit(&json!({
                "name": name,
                "email": format!("{name}@example.com"),
                "message": format!("Hello from {name}"),
            }))
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        body["contact_id"].as_u64().unwrap()
    }

    pub async fn list_contacts(&self) -> reqwest::Response {
        self.client.get(format!("{}/api/contacts", self.server_url)).send().await.unwrap()
    }
}

/// A store whose every operation fails with an I/O error.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("/unavailable/contacts.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        }
    }
}

#[async_trait]
impl ContactStore for FailingStore {
    async fn load(&self) -> Result<Vec<Contact>, StoreError> {
        Err(Self::error())
    }

    async fn append(&self, _candidate: NewContact) -> Result<Contact, StoreError> {
        Err(Self::error())
    }

    async fn save(&self, _contacts: &[Contact]) -> Result<(), StoreError> {
        Err(Self::error())
    }
}
