use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ScanError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Response body unreadable: {0}")]
    BodyReadFailed(String),

    #[error("Screenshot capture failed: {0}")]
    CaptureFailed(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunchFailed(String),

    #[error("Page error: {0}")]
    PageError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ScanError {
    /// Whether the error is scoped to a single domain
    ///
    /// Local errors are swallowed at the domain boundary; everything else
    /// is allowed to abort the run.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ScanError::NetworkError(_)
                | ScanError::Timeout(_)
                | ScanError::BodyReadFailed(_)
                | ScanError::CaptureFailed(_)
                | ScanError::PageError(_)
        )
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::SerializationError(err.to_string())
    }
}
