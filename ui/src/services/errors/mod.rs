use thiserror::Error;

use crate::features::settings::UploadError;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("{0}")]
    Validation(String),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Service(String),

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of the browser-local storage backing the session and config.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend unavailable: {backend}")]
    BackendUnavailable { backend: String },

    #[error("Storage operation failed: {operation} - {reason}")]
    OperationFailed { operation: String, reason: String },
}

impl From<reqwest::Error> for PortalError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            PortalError::InvalidResponse(error.to_string())
        } else {
            PortalError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(error: serde_json::Error) -> Self {
        PortalError::InvalidResponse(error.to_string())
    }
}

pub type PortalResult<T> = Result<T, PortalError>;

impl PortalError {
    /// The single string shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Validation(message) | PortalError::Service(message) => message.clone(),
            PortalError::Upload(error) => error.to_string(),
            PortalError::Network(reason) => format!("Network error: {}", reason),
            PortalError::InvalidResponse(_) => "Unexpected response from server".to_string(),
            PortalError::Storage(_) => "Could not access browser storage".to_string(),
        }
    }

    /// True when the failure was caught before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(self, PortalError::Validation(_) | PortalError::Upload(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_is_verbatim() {
        let error = PortalError::Service("Email already registered".to_string());
        assert_eq!(error.user_message(), "Email already registered");
        assert!(!error.is_client_side());
    }

    #[test]
    fn test_client_side_taxonomy() {
        assert!(PortalError::Validation("Email is required".into()).is_client_side());
        assert!(PortalError::Upload(UploadError::EmptyFile).is_client_side());
        assert!(!PortalError::Network("offline".into()).is_client_side());
    }

    #[test]
    fn test_storage_message_hides_backend_detail() {
        let error: PortalError = StorageError::BackendUnavailable {
            backend: "localStorage".to_string(),
        }
        .into();
        assert_eq!(error.user_message(), "Could not access browser storage");
    }
}
