use thiserror::Error;

#[derive(Debug, Error)]
pub enum PcauditError {
    #[error("configuration error: {0}")]
    Config(String),
}

pub type PcauditResult<T> = Result<T, PcauditError>;
