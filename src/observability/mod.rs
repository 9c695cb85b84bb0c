//! Logging and tracing setup.
//!
//! Events are formatted to stderr through `tracing-subscriber`. Spans can
//! additionally be exported through OpenTelemetry to a local file:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - **Opt-in**: export only runs when `trace_file` is configured
//! - **Rotation**: files rotate at 10 MB, three backups kept
//! - **Format**: one OTLP JSON document per exported batch
//!
//! # Modules
//!
//! - [`init`]: subscriber installation
//! - [`tracer`]: tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
