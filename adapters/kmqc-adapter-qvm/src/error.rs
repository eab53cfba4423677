//! Error types for the QVM connection.

use kmqc_ir::IrError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for QVM operations.
pub type QvmResult<T> = Result<T, QvmError>;

/// Errors that can occur when executing a program on the QVM.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QvmError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Program failed to compile; no request was sent.
    #[error("Compile error: {0}")]
    Compile(#[from] IrError),

    /// Connection settings are missing or invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl QvmError {
    /// True when the error was raised before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(self, QvmError::Compile(_) | QvmError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = QvmError::Api {
            status: 503,
            message: "Service unavailable".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service unavailable"));
    }

    #[test]
    fn test_compile_error_from_ir() {
        let err: QvmError = IrError::EmptyProgram.into();
        assert!(matches!(err, QvmError::Compile(IrError::EmptyProgram)));
        assert!(err.is_local());
    }

    #[test]
    fn test_config_error_from_config() {
        let err: QvmError = ConfigError::MissingSection("qvm_conn".into()).into();
        assert!(err.to_string().contains("qvm_conn"));
        assert!(err.is_local());
    }

    #[test]
    fn test_api_error_is_remote() {
        let err = QvmError::Api {
            status: 500,
            message: String::new(),
        };
        assert!(!err.is_local());
    }
}
