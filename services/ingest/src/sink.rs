use std::io::Write;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Host stamped on every emitted event. Fixed to the upstream audit
/// endpoint rather than the configured API domain.
pub const EVENT_HOST: &str = "api.prismacloud.io";
pub const EVENT_SOURCE: &str = "/audit/redlock";

/// The tuple handed to the downstream collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkEvent {
    /// Unix seconds of the record's `received` time.
    pub time: i64,
    pub host: &'static str,
    pub source: &'static str,
    /// Compact JSON of the full audit record, no superfluous whitespace.
    pub data: String,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write event to sink: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to frame event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Downstream event collector. The real write protocol and framing live
/// behind this boundary; the engine only hands over tuples.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn write_event(&self, event: SinkEvent) -> Result<(), SinkError>;
}

/// JSON-lines sink on stdout, one event per line.
pub struct StdoutJsonSink;

#[async_trait]
impl EventSink for StdoutJsonSink {
    async fn write_event(&self, event: SinkEvent) -> Result<(), SinkError> {
        let line = serde_json::to_string(&event)?;
        let mut out = std::io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
