use thiserror::Error;

use kinship_core::ConfigError;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("model invariant violated: {0}")]
    Model(#[from] kinship_core::Error),
    #[error(
        "no eligible pair for mixed family #{family_index} after {attempts} attempts \
         ({males} single male(s), {females} single female(s))"
    )]
    PoolExhausted {
        family_index: u64,
        attempts: u32,
        males: usize,
        females: usize,
    },
}

/// Errors raised while writing the document or the run report.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid output path: {0}")]
    InvalidPath(String),
}
