use chrono::Utc;
use thiserror::Error;

use pcaudit_common::types::InstanceId;

use crate::checkpoint::{CheckpointStore, CheckpointWriteError};
use crate::credentials::{CredentialError, CredentialProvider};
use crate::prisma::client::{ApiError, AuditClient};
use crate::prisma::models::{AuditRecord, RecordTimeError};
use crate::sink::{EventSink, SinkError, SinkEvent, EVENT_HOST, EVENT_SOURCE};
use crate::window::PollWindow;

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    RecordTime(#[from] RecordTimeError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointWriteError),

    #[error("failed to serialize record payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct CycleOutcome {
    pub emitted: usize,
    pub watermark: i64,
}

/// Forward records newer than `floor` to the sink.
///
/// Returns the emitted count and the new high-watermark: the maximum
/// `received` time among qualifying records, or `floor` itself when
/// nothing qualifies. The comparison is strictly greater-than, so the
/// boundary record is never re-emitted. Emission keeps API response
/// order, which need not be chronological.
pub async fn emit_new_events<S>(
    sink: &S,
    records: &[AuditRecord],
    floor: i64,
) -> Result<(usize, i64), CycleError>
where
    S: EventSink + ?Sized,
{
    let mut high = floor;
    let mut emitted = 0;

    for record in records {
        let t = record.received_epoch()?;
        if t <= floor {
            continue;
        }

        let data = serde_json::to_string(record)?;
        sink.write_event(SinkEvent {
            time: t,
            host: EVENT_HOST,
            source: EVENT_SOURCE,
            data,
        })
        .await?;

        high = high.max(t);
        emitted += 1;
    }

    Ok((emitted, high))
}

/// One checkpointed poll of the audit feed.
///
/// Sequence: read checkpoint, compute window, resolve credential, fetch,
/// filter/emit, write checkpoint. Any failure before the checkpoint
/// write leaves the stored watermark untouched, so the next scheduled
/// invocation retries the identical window. There is no in-process
/// retry; host re-invocation is the sole recovery mechanism.
pub struct PollCycle<P, C, S> {
    instance: InstanceId,
    history_days: u32,
    client: AuditClient,
    credentials: P,
    checkpoints: C,
    sink: S,
}

impl<P, C, S> PollCycle<P, C, S>
where
    P: CredentialProvider,
    C: CheckpointStore,
    S: EventSink,
{
    pub fn new(
        instance: InstanceId,
        history_days: u32,
        client: AuditClient,
        credentials: P,
        checkpoints: C,
        sink: S,
    ) -> Self {
        Self {
            instance,
            history_days,
            client,
            credentials,
            checkpoints,
            sink,
        }
    }

    pub async fn run(&self) -> Result<CycleOutcome, CycleError> {
        let watermark = self.checkpoints.read(&self.instance).await;
        let now = Utc::now().timestamp();
        let window = PollWindow::compute(watermark, now, self.history_days);

        match watermark {
            Some(wm) => tracing::info!(
                instance = %self.instance,
                watermark = wm,
                minutes = window.minutes,
                "resuming from checkpoint"
            ),
            None => tracing::warn!(
                instance = %self.instance,
                history_days = self.history_days,
                minutes = window.minutes,
                "no checkpoint found, starting from history window"
            ),
        }

        let api_key = self.credentials.api_key(&self.instance).await?;

        let records = match self.client.fetch_audit_events(&api_key, window.minutes).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    instance = %self.instance,
                    error = %e,
                    "audit fetch failed, checkpoint left untouched"
                );
                return Err(e.into());
            }
        };
        tracing::info!(count = records.len(), "fetched audit records");

        // With no prior watermark the floor is the window start: the
        // high-watermark never starts below the range we requested, and
        // an empty cold-start cycle still persists it so the same
        // historical range is not re-scanned forever.
        let floor = watermark.unwrap_or(window.start);
        let (emitted, new_watermark) = emit_new_events(&self.sink, &records, floor).await?;

        self.checkpoints
            .write(&self.instance, new_watermark)
            .await?;

        tracing::info!(emitted, watermark = new_watermark, "poll cycle completed");
        Ok(CycleOutcome {
            emitted,
            watermark: new_watermark,
        })
    }
}
