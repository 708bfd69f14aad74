//! OpenTelemetry-based observability with file-based trace export.
//!
//! This module provides distributed tracing infrastructure for the engine,
//! using OpenTelemetry OTLP format with file-based exporting. Traces are
//! written to JSON lines for offline analysis and debugging.
//!
//! # Architecture
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSONL file
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the screen configuration
//! 3. Default: `"info"`
//!
//! Spans land in `localfind-traces.jsonl` under the platform data directory,
//! rotated at 5 MB with two rotations retained.
//!
//! # Modules
//!
//! - [`init`]: tracing initialization and subscriber setup
//! - `export`: rotating OTLP JSON file exporter (internal)

mod export;
mod init;

pub use init::init_tracing;
