use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("stored task list is not valid JSON: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("failed to serialize task list: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("browser storage is unavailable")]
    StorageUnavailable,
}

pub type Result<T> = std::result::Result<T, BoardError>;
