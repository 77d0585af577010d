//! OpenTelemetry-based observability with file-based trace export.
//!
//! Zellij plugins have no network of their own and no stderr worth reading,
//! so spans are written as OTLP JSON lines to a size-rotated file in the
//! plugin data directory:
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → notepane-otlp.json
//! ```
//!
//! The file lives at `~/.local/share/zellij/notepane/notepane-otlp.json` and
//! rotates into `.1`, `.2`, `.3` backups at 10 MB.
//!
//! Trace level comes from the `trace_level` plugin option (default `"info"`)
//! and accepts any `EnvFilter` directive, e.g. `"notepane=debug"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: OTLP JSON encoding and the span exporter
//! - `rotating`: Append-only file with numbered backups

mod exporter;
mod init;
mod rotating;

pub use init::init_tracing;
