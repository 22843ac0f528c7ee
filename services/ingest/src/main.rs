mod checkpoint;
mod credentials;
mod cycle;
mod prisma;
mod sink;
mod window;

use pcaudit_config::{init_tracing, AppConfig};

use crate::checkpoint::FileCheckpointStore;
use crate::credentials::EnvCredentialProvider;
use crate::cycle::PollCycle;
use crate::prisma::client::{AuditClient, AuditClientConfig};
use crate::sink::StdoutJsonSink;

/// One invocation runs exactly one poll cycle and exits; the host
/// scheduler (cron, systemd timer, modular-input runner) re-invokes it.
#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("failed to load config");
    init_tracing(&config.log_level);

    let instance = config.instance();
    tracing::info!(
        service = "pcaudit-ingest",
        instance = %instance,
        domain = %config.domain,
        "starting"
    );

    let client = AuditClient::new(AuditClientConfig {
        base_url: config.base_url(),
        timeout_secs: config.timeout_secs,
    })
    .expect("failed to create audit client");

    let cycle = PollCycle::new(
        instance,
        config.history_days,
        client,
        EnvCredentialProvider::new(config.api_key.clone()),
        FileCheckpointStore::new(&config.checkpoint_dir),
        StdoutJsonSink,
    );

    match cycle.run().await {
        Ok(outcome) => {
            tracing::info!(
                emitted = outcome.emitted,
                watermark = outcome.watermark,
                "ingest finished"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "poll cycle failed");
            std::process::exit(1);
        }
    }
}
