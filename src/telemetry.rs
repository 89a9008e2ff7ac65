use crate::config::{LogFormat, TelemetryConfig};
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
    propagation::TraceContextPropagator,
    trace::SdkTracerProvider,
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const METER_NAME: &str = "itsite-server";

/// Owns the OTLP providers so buffered spans and metrics can be flushed on exit.
#[derive(Debug, Default)]
#[must_use = "dropping the guard skips the final telemetry flush"]
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    /// Returns `true` when traces and metrics are being exported.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.tracer_provider.is_some()
    }

    /// Flushes and stops the exporters. A no-op when OTLP export is disabled.
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "Failed to shut down tracer provider");
        }
        if let Some(provider) = self.meter_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "Failed to shut down meter provider");
        }
    }
}

/// Installs the global tracing subscriber and, when an OTLP endpoint is configured,
/// the global tracer and meter providers.
///
/// `RUST_LOG` wins over the configured level when present.
///
/// # Errors
/// Returns an error if the filter is invalid, an exporter cannot be built, or a
/// subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?
        .add_directive("hyper=warn".parse()?)
        .add_directive("tower_http=info".parse()?);

    let registry = Registry::default().with(filter);

    let (otel_layer, guard) = if let Some(endpoint) = &config.otlp_endpoint {
        let resource = Resource::builder()
            .with_attributes(vec![
                KeyValue::new(SERVICE_NAME, METER_NAME),
                KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
            ])
            .build();

        global::set_text_map_propagator(TraceContextPropagator::new());

        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(resource.clone())
            .with_batch_exporter(
                opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .with_endpoint(signal_endpoint(endpoint, "traces"))
                    .build()?,
            )
            .build();

        let tracer = opentelemetry::trace::TracerProvider::tracer(&tracer_provider, METER_NAME);
        global::set_tracer_provider(tracer_provider.clone());

        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_http()
            .with_endpoint(signal_endpoint(endpoint, "metrics"))
            .build()?;
        let reader = PeriodicReader::builder(exporter).build();
        let meter_provider = SdkMeterProvider::builder().with_resource(resource).with_reader(reader).build();
        global::set_meter_provider(meter_provider.clone());

        let guard = TelemetryGuard { tracer_provider: Some(tracer_provider), meter_provider: Some(meter_provider) };
        (Some(OpenTelemetryLayer::new(tracer)), guard)
    } else {
        (None, TelemetryGuard::default())
    };

    let registry = registry.with(otel_layer);

    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init()?,
    }

    if guard.is_exporting() {
        tracing::info!(endpoint = config.otlp_endpoint.as_deref().unwrap_or_default(), "OTLP export enabled");
    }

    Ok(guard)
}

/// Per-signal OTLP/HTTP path under the collector base URL.
fn signal_endpoint(base: &str, signal: &str) -> String {
    format!("{}/v1/{signal}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_endpoint_joins_paths() {
        assert_eq!(signal_endpoint("http://collector:4318", "traces"), "http://collector:4318/v1/traces");
        assert_eq!(signal_endpoint("http://collector:4318/", "metrics"), "http://collector:4318/v1/metrics");
    }

    #[test]
    fn test_disabled_guard_shuts_down_cleanly() {
        let guard = TelemetryGuard::default();
        assert!(!guard.is_exporting());
        guard.shutdown();
    }
}
