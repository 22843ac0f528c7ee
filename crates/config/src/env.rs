use std::env;
use std::path::PathBuf;

use pcaudit_common::error::{PcauditError, PcauditResult};
use pcaudit_common::types::InstanceId;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Prisma Cloud API key. Treated as an opaque secret and never logged.
    pub api_key: String,
    pub domain: String,
    /// Days of history to request when no checkpoint exists.
    pub history_days: u32,
    pub checkpoint_dir: PathBuf,
    pub input_kind: String,
    pub input_name: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> PcauditResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_key: get_var("PRISMA_API_KEY")?,
            domain: get_var_or("PRISMA_DOMAIN", "api.prismacloud.io"),
            history_days: get_var_or("PRISMA_HISTORY_DAYS", "7")
                .parse()
                .map_err(|e| PcauditError::Config(format!("invalid PRISMA_HISTORY_DAYS: {e}")))?,
            checkpoint_dir: PathBuf::from(get_var("CHECKPOINT_DIR")?),
            input_kind: get_var_or("INPUT_KIND", "prisma_cloud_audit"),
            input_name: get_var_or("INPUT_NAME", "default"),
            timeout_secs: get_var_or("PRISMA_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|e| PcauditError::Config(format!("invalid PRISMA_TIMEOUT_SECS: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }

    pub fn base_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    pub fn instance(&self) -> InstanceId {
        InstanceId::new(self.input_kind.clone(), self.input_name.clone())
    }
}

fn get_var(key: &str) -> PcauditResult<String> {
    env::var(key).map_err(|_| PcauditError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
