use async_trait::async_trait;
use thiserror::Error;

use pcaudit_common::types::InstanceId;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no api key available for {instance}, reconfigure its value")]
    Missing { instance: String },
}

/// Supplies the decrypted API key for a polling target.
///
/// The engine treats the key as an opaque secret: it is sent on the wire
/// and nowhere else, never logged and never persisted in cleartext.
/// Encrypted credential stores live behind this boundary.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn api_key(&self, id: &InstanceId) -> Result<String, CredentialError>;
}

/// Provider backed by a key already resolved from the environment.
pub struct EnvCredentialProvider {
    api_key: String,
}

impl EnvCredentialProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn api_key(&self, id: &InstanceId) -> Result<String, CredentialError> {
        if self.api_key.is_empty() {
            return Err(CredentialError::Missing {
                instance: id.to_string(),
            });
        }
        Ok(self.api_key.clone())
    }
}
