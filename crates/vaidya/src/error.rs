use vaidya_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("catalog entry {index} ({disease}): unrecognized severity tier '{value}'")]
    DataIntegrity {
        index: usize,
        disease: String,
        value: String,
    },

    #[error("consultation log error: {0}")]
    Log(#[from] rusqlite::Error),

    #[error("consultation log holds invalid data: {0}")]
    LogCorrupt(String),

    #[error("consultation log is unavailable: connection lock poisoned")]
    LogPoisoned,

    #[error("consultation log task failed: {0}")]
    LogTask(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
