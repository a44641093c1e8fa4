use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required property: {name}")]
    MissingProperty { name: String },

    #[error("Invalid property '{name}': {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("Malformed agent event: {message}")]
    MalformedEvent { message: String },

    #[error("Knowledge base retrieval failed: {message}")]
    Retrieval { message: String },

    #[error("Model invocation failed: {message}")]
    ModelInvocation { message: String },

    #[error("Failed to create/update {path}{}: {message}", http_status_suffix(.status))]
    Commit {
        path: String,
        status: Option<u16>,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;

fn http_status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" (HTTP {})", code))
        .unwrap_or_default()
}
