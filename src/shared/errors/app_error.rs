use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Storage timeout: {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Stable discriminant of an [`AppError`], for callers that translate
/// errors into user-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    StorageWrite,
    StorageRead,
    NotFound,
    Decode,
    Encode,
    Timeout,
    InvalidConfig,
    ServiceUnavailable,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Connection(_) => ErrorKind::Connection,
            AppError::StorageWrite(_) => ErrorKind::StorageWrite,
            AppError::StorageRead(_) => ErrorKind::StorageRead,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Decode(_) => ErrorKind::Decode,
            AppError::Encode(_) => ErrorKind::Encode,
            AppError::Timeout(_) => ErrorKind::Timeout,
            AppError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            AppError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// Whether the error was caused by the backing store rather than the caller.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            AppError::Connection(_)
                | AppError::StorageWrite(_)
                | AppError::StorageRead(_)
                | AppError::Timeout(_)
        )
    }
}

impl From<rmpv::decode::Error> for AppError {
    fn from(err: rmpv::decode::Error) -> Self {
        AppError::Decode(format!("Invalid MessagePack data: {}", err))
    }
}

impl From<rmpv::encode::Error> for AppError {
    fn from(err: rmpv::encode::Error) -> Self {
        AppError::Encode(format!("Failed to write MessagePack data: {}", err))
    }
}

impl From<rmp_serde::encode::Error> for AppError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        AppError::Encode(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for AppError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Encode(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
