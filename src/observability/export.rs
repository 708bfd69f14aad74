//! File-based OTLP span export.
//!
//! This module implements a custom `SpanExporter` that serializes finished
//! spans to OTLP JSON and appends them, one document per line, to a rotating
//! local file. The engine runs inside host applications where a network
//! collector is rarely available; a local trace file keeps spans inspectable
//! with standard OTLP tooling regardless.

use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::Value as JsonValue;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Maximum trace file size before rotation (5 MB).
const MAX_TRACE_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated trace files to retain.
const MAX_ROTATED_FILES: usize = 2;

/// Appends lines to a trace file, rotating it when it grows too large.
///
/// Rotation renames the current file with a Unix-timestamp suffix and starts
/// a fresh one; rotated files beyond the retention count are deleted, oldest
/// first. A `Mutex` guards the handle so the exporter stays usable from
/// whichever thread the SDK drives it on.
struct RotatingFileWriter {
    path: PathBuf,
    handle: Mutex<Option<fs::File>>,
}

impl RotatingFileWriter {
    const fn new(path: PathBuf) -> Self {
        Self {
            path,
            handle: Mutex::new(None),
        }
    }

    /// Appends one line, rotating first if the file is over budget.
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            if metadata.len() > MAX_TRACE_FILE_BYTES {
                *handle = None;
                self.rotate()?;
            }
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "no trace file"))?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    /// Renames the full file aside and prunes old rotations.
    fn rotate(&self) -> std::io::Result<()> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        if self.path.exists() {
            let rotated = self.path.with_extension(format!("jsonl.{stamp}"));
            fs::rename(&self.path, rotated)?;
        }

        self.prune_rotated();
        Ok(())
    }

    /// Deletes rotated files beyond the retention count, oldest first.
    ///
    /// Individual deletion failures are ignored so pruning never blocks a
    /// write.
    fn prune_rotated(&self) {
        let Some(parent) = self.path.parent() else {
            return;
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return;
        };

        let Ok(entries) = fs::read_dir(parent) else {
            return;
        };

        let mut rotated: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path != &self.path
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.starts_with(stem))
            })
            .collect();

        rotated.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for stale in rotated.iter().skip(MAX_ROTATED_FILES) {
            let _ = fs::remove_file(stale);
        }
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// OpenTelemetry span exporter writing OTLP JSON lines to a rotating file.
#[derive(Debug)]
struct FileSpanExporter {
    writer: RotatingFileWriter,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: RotatingFileWriter::new(path),
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let document = batch_to_otlp(&self.resource, &batch);
        let result = self
            .writer
            .append_line(&document.to_string())
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        self.resource = res.clone();
    }
}

/// Creates a tracer provider exporting spans to the given file.
///
/// The provider uses a simple (immediate, unbatched) export strategy: spans
/// land on disk as soon as they finish, which keeps the file truthful even
/// when the host tears the process down without a clean shutdown.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

/// Serializes a span batch as one OTLP JSON document.
///
/// The shape matches what OTLP collectors ingest: `resourceSpans` wrapping
/// resource attributes, a scope, and the span array.
fn batch_to_otlp(resource: &Resource, batch: &[SpanData]) -> JsonValue {
    let resource_attrs: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| {
            serde_json::json!({ "key": key.to_string(), "value": attribute_value(value) })
        })
        .collect();

    let spans: Vec<JsonValue> = batch.iter().map(span_to_json).collect();

    serde_json::json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attrs },
            "scopeSpans": [{
                "scope": { "name": "localfind" },
                "spans": spans
            }]
        }]
    })
}

/// Serializes one span: hex IDs, nanosecond timestamps, attributes, events,
/// and status.
fn span_to_json(span: &SpanData) -> JsonValue {
    let parent_span_id = if span.parent_span_id == opentelemetry::trace::SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    let (status_code, status_message) = match &span.status {
        opentelemetry::trace::Status::Unset => (0, String::new()),
        opentelemetry::trace::Status::Ok => (1, String::new()),
        opentelemetry::trace::Status::Error { description } => (2, description.to_string()),
    };

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            let attrs: Vec<JsonValue> = event
                .attributes
                .iter()
                .map(|kv| {
                    serde_json::json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) })
                })
                .collect();
            serde_json::json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": attrs,
            })
        })
        .collect();

    let attributes: Vec<JsonValue> = span
        .attributes
        .iter()
        .map(|kv| {
            serde_json::json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) })
        })
        .collect();

    serde_json::json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent_span_id,
        "name": span.name,
        "kind": span_kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes,
        "events": events,
        "status": { "code": status_code, "message": status_message },
    })
}

/// Serializes one attribute value in OTLP's tagged-value encoding.
fn attribute_value(value: &opentelemetry::Value) -> JsonValue {
    use opentelemetry::Value;

    match value {
        Value::Bool(b) => serde_json::json!({ "boolValue": b }),
        Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
        Value::F64(f) => serde_json::json!({ "doubleValue": f }),
        Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
        Value::Array(_) => serde_json::json!({ "stringValue": format!("{value:?}") }),
    }
}

/// OTLP span-kind code: internal=1, server=2, client=3, producer=4, consumer=5.
const fn span_kind_code(kind: &opentelemetry::trace::SpanKind) -> u8 {
    match kind {
        opentelemetry::trace::SpanKind::Internal => 1,
        opentelemetry::trace::SpanKind::Server => 2,
        opentelemetry::trace::SpanKind::Client => 3,
        opentelemetry::trace::SpanKind::Producer => 4,
        opentelemetry::trace::SpanKind::Consumer => 5,
    }
}

/// Nanoseconds since the Unix epoch, as the decimal string OTLP expects.
fn unix_nanos(time: std::time::SystemTime) -> String {
    time.duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}
