use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmileError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Moment not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend responded with {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Journal not initialized. Run 'smile init' first.")]
    NotInitialized,

    #[error("Journal already initialized at {0}")]
    AlreadyInitialized(String),
}

impl SmileError {
    /// Message suitable for showing to the person using the app.
    ///
    /// Transport and storage failures collapse into a generic sentence; the
    /// detailed error is still available through `Display` for logs.
    pub fn user_message(&self) -> String {
        match self {
            SmileError::Validation(msg) => msg.clone(),
            SmileError::NotFound(_) => "That moment could not be found.".to_string(),
            SmileError::Unauthorized(_) => {
                "Your session has expired or is missing. Please log in again.".to_string()
            }
            SmileError::PermissionDenied(_) => {
                "You don't have permission to do that.".to_string()
            }
            SmileError::Api { message, .. } if !message.is_empty() => message.clone(),
            SmileError::Api { .. } | SmileError::Http(_) => {
                "Something went wrong talking to the server. Please try again.".to_string()
            }
            SmileError::Config(_)
            | SmileError::NotInitialized
            | SmileError::AlreadyInitialized(_) => self.to_string(),
            SmileError::Storage(_)
            | SmileError::Parse(_)
            | SmileError::Io(_)
            | SmileError::Yaml(_)
            | SmileError::Json(_) => {
                "Something went wrong saving or loading your moments.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SmileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_keeps_validation_text() {
        let err = SmileError::Validation("Please write something about your moment".into());
        assert_eq!(
            err.user_message(),
            "Please write something about your moment"
        );
    }

    #[test]
    fn test_user_message_hides_storage_details() {
        let err = SmileError::Storage("rename failed: EXDEV".into());
        assert!(!err.user_message().contains("EXDEV"));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = SmileError::Api {
            status: 422,
            message: "Media file is required".into(),
        };
        assert_eq!(err.user_message(), "Media file is required");

        let err = SmileError::Api {
            status: 502,
            message: String::new(),
        };
        assert!(err.user_message().contains("server"));
    }
}
