//! Error types for the mailshot front-end

use mailshot_api::ApiError;

/// Errors that can occur in the front-end
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Unknown route: {0}")]
    Route(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for front-end operations
pub type Result<T> = std::result::Result<T, ConsoleError>;
