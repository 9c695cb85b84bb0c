//! Subscriber setup.

use super::tracer::{file_tracer_provider, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// - `RUST_LOG` wins over `config.trace_level`, which defaults to `"info"`
/// - Human-readable events go to stderr
/// - With `config.trace_file` set, spans are also exported as OTLP JSON
///
/// Only the first call takes effect. A trace file whose directory cannot be
/// created is skipped with a warning.
///
/// # Example
///
/// ```rust
/// use artfeed::observability::init_tracing;
/// use artfeed::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut export_error = None;
    let otel_layer = config.trace_file.as_ref().and_then(|path| {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(dir) {
                export_error = Some(format!("{}: {e}", dir.display()));
                return None;
            }
        }

        let resource = Resource::new(vec![
            KeyValue::new("service.name", SCOPE),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = file_tracer_provider(path.clone(), resource);
        Some(OpenTelemetryLayer::new(provider.tracer(SCOPE)))
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        if let Some(error) = export_error {
            tracing::warn!(error = %error, "span export disabled");
        }
    }
}
