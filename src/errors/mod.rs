use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // Parsing errors
    #[error("Response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("News API error ({code}): {message}")]
    Api { code: String, message: String },

    // Storage errors
    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("View state queue is closed")]
    ActorClosed,
}

impl NewsError {
    /// Errors that come out of a headline fetch and trigger the offline fallback.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            NewsError::Transport(_) | NewsError::Decode(_) | NewsError::Api { .. }
        )
    }
}

pub type NewsResult<T> = Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_fetch_failure() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(NewsError::from(err).is_fetch_failure());
    }

    #[test]
    fn test_api_error_is_fetch_failure() {
        let err = NewsError::Api {
            code: "apiKeyInvalid".to_string(),
            message: "Your API key is invalid".to_string(),
        };
        assert!(err.is_fetch_failure());
        assert_eq!(
            err.to_string(),
            "News API error (apiKeyInvalid): Your API key is invalid"
        );
    }

    #[test]
    fn test_storage_is_not_fetch_failure() {
        let err = NewsError::Storage(rusqlite::Error::InvalidQuery);
        assert!(!err.is_fetch_failure());
        assert!(!NewsError::ActorClosed.is_fetch_failure());
    }
}
