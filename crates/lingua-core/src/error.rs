use thiserror::Error;

/// Top-level error type for Lingua.
///
/// Message resolution never fails; these errors only surface while loading
/// configuration or a message catalog.
#[derive(Debug, Error)]
pub enum LinguaError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Message catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A locale tag outside the supported set.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
