//! Error types for the outreach engine.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Send error: {0}")]
    Send(#[from] SendError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Configuration-related errors. An invalid pacing config aborts a
/// campaign before any send.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Search provider errors. Never surfaced as hard failures — the
/// resolver absorbs these and degrades to synthetic generation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Search request failed: {0}")]
    Http(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Mail transport failure, classified for retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SendError {
    /// Retryable network/timeout failure.
    #[error("Transient send failure: {0}")]
    Transient(String),

    /// Non-retryable failure (credentials, malformed address, 5xx reject).
    #[error("Permanent send failure: {0}")]
    Permanent(String),
}

/// Contact-table export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
