//! Error types for queue operations.

/// Failures raised by [`CircularQueue`](crate::core::queue::CircularQueue)
/// and its iteration handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// A supplied argument is out of range (e.g. a negative capacity)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required source collection was absent
    #[error("Null reference: {0}")]
    NullReference(String),

    /// The operation is impossible in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The operation is not supported at all
    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl QueueError {
    pub(crate) fn empty() -> Self {
        QueueError::InvalidState("queue is empty".into())
    }

    pub(crate) fn modified() -> Self {
        QueueError::InvalidState("queue was modified during iteration".into())
    }

    /// `NotSupported` counts as a flavour of invalid state.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, QueueError::InvalidState(_) | QueueError::NotSupported(_))
    }
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

/// Failures while loading configuration or writing the journal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Unknown log level: {0}")]
    LogLevel(String),
}
