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

use itsite_server::config::Config;
use itsite_server::{AppBuilder, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use time::UtcOffset;
use tokio::sync::watch;
use tracing::Instrument;

fn main() -> anyhow::Result<()> {
    let config = Config::load();

    // The local offset can only be queried soundly while the process is single-threaded.
    let utc_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;
    itsite_server::setup_panic_hook();

    let result = tokio::runtime::Builder::new_multi_thread().enable_all().build()?.block_on(run(config, utc_offset));

    telemetry_guard.shutdown();
    result
}

async fn run(config: Config, utc_offset: UtcOffset) -> anyhow::Result<()> {
    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app, shutdown_tx, shutdown_rx) = async {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            data_file = %config.data_file.display(),
            utc_offset = %utc_offset,
            "Starting IT website server"
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        itsite_server::spawn_signal_handler(shutdown_tx.clone());

        let app = AppBuilder::new(config.clone()).with_utc_offset(utc_offset).build().await?;

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app, shutdown_tx, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app.app_router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = api_rx.wait_for(|&s| s).await;
        });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, app.mgmt_router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = mgmt_rx.wait_for(|&s| s).await;
        });

    // Bounds how long in-flight requests may keep the process alive after a signal.
    let mut drain_rx = shutdown_rx;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let drain_deadline = async move {
        let _ = drain_rx.wait_for(|&s| s).await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        res = async { tokio::try_join!(api_server.into_future(), mgmt_server.into_future()) } => {
            match res {
                Ok(_) => tracing::info!("Servers stopped"),
                Err(e) => tracing::error!(error = %e, "Server error"),
            }
        }
        () = drain_deadline => {
            tracing::warn!("Timeout waiting for in-flight requests to finish.");
        }
    }

    let _ = shutdown_tx.send(true);
    Ok(())
}
