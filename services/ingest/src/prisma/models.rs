use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unparseable received timestamp {value:?}: {source}")]
pub struct RecordTimeError {
    pub value: String,
    #[source]
    source: chrono::ParseError,
}

/// One audit event from `/audit/redlock`.
///
/// Only `received` is interpreted; the rest of the payload is an opaque
/// blob that passes through to the sink untouched. The upstream schema
/// is not ours to pin down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub received: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AuditRecord {
    /// Unix seconds of `received`.
    ///
    /// A parse failure here is fatal to the cycle: the watermark must
    /// never advance past a record whose time cannot be read.
    pub fn received_epoch(&self) -> Result<i64, RecordTimeError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.received) {
            return Ok(dt.timestamp());
        }
        // The upstream occasionally omits the offset; read those as UTC
        // rather than wedging the watermark behind a fatal parse error.
        self.received
            .parse::<NaiveDateTime>()
            .map(|dt| dt.and_utc().timestamp())
            .map_err(|source| RecordTimeError {
                value: self.received.clone(),
                source,
            })
    }
}
