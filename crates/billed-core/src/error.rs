//! Error types module
//!
//! All failures raised inside the Billed controllers are unified under the
//! `AppError` enum. Store failures have their own type in `billed-store` and
//! are converted at the controller boundary.

/// How an error is presented to the user and tagged in logs.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "SESSION_ERROR")
    fn error_code(&self) -> &'static str;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::Session(_) => "SESSION_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Store(_) => "STORE_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Session(_) => "Your session has expired".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            // Store messages are already user-facing ("Erreur 404")
            AppError::Store(ref msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_session() {
        let err = AppError::Session("missing user".to_string());
        assert_eq!(err.error_code(), "SESSION_ERROR");
        assert_eq!(err.client_message(), "Your session has expired");
    }

    #[test]
    fn test_error_metadata_store_keeps_message() {
        let err = AppError::Store("Erreur 500".to_string());
        assert_eq!(err.error_code(), "STORE_ERROR");
        assert_eq!(err.client_message(), "Erreur 500");
    }

    #[test]
    fn test_error_from_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err = AppError::from(parse.unwrap_err());
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().starts_with("Invalid input: JSON parsing error"));
    }

    #[test]
    fn test_session_error_keeps_detail_in_display() {
        let err = AppError::Session("No user in session".to_string());
        assert_eq!(err.to_string(), "Session error: No user in session");
        assert_ne!(err.client_message(), err.to_string());
    }
}
