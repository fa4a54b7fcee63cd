/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// True for failures of the catalog transport (network errors, non-2xx
    /// statuses, malformed bodies). These are the failures query operations
    /// replace with cache-derived answers.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::HttpClient(_) | AppError::ExternalApi(_))
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Show not found",
            AppError::InvalidInput(_) => "Invalid request",
            AppError::HttpClient(_) | AppError::ExternalApi(_) => {
                "Error while loading the catalog"
            }
            AppError::Storage(_) | AppError::Serialization(_) => {
                "Error while saving your preferences"
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
