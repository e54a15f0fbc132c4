/// Errors reported by host collaborators
use thiserror::Error;

/// Result type alias for collaborator calls
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failure reported by a host collaborator (media store, record sink)
#[derive(Error, Debug)]
pub enum HostError {
    /// The host refused the request (e.g. a record that renders no cards)
    #[error("Rejected by host: {0}")]
    Rejected(String),

    /// The host does not implement the requested operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid input supplied to a core type
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl HostError {
    /// Create a rejection error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create an unsupported operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
