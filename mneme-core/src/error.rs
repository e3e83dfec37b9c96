//! Error types for Mneme operations

/// Result type for Mneme operations
pub type Result<T> = std::result::Result<T, MnemeError>;

/// Error types for the Mneme session manager
#[derive(Debug, thiserror::Error)]
pub enum MnemeError {
    /// Inference gateway call failed (network, quota, malformed response)
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for MnemeError {
    fn from(s: String) -> Self {
        MnemeError::Other(s)
    }
}

impl From<&str> for MnemeError {
    fn from(s: &str) -> Self {
        MnemeError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for MnemeError {
    fn from(err: anyhow::Error) -> Self {
        MnemeError::Other(err.to_string())
    }
}
