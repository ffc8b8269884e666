use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Scenario '{scenario}' references unknown subject '{subject}'")]
    UnknownSubject { subject: String, scenario: String },
    #[error("Invalid expiry directive '{0}'")]
    BadDuration(String),
    #[error("Token encoding error: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
